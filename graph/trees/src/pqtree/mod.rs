//! A modified PQ-tree.
//!
//! P-nodes keep their children on a [`Ring`] with one child marked current; Q-nodes keep
//! theirs on an explicit chain of sections, one child per section. Every node carries two
//! vertex sets: `set_b`, the vertices of its subtree, and `set_a`, candidates collected
//! while a refinement is in progress. A node whose `set_a` is non-empty is *pending*, and
//! no structural change is accepted until every pending node has been committed with
//! [`PQTree::add_set_a_to_set_b`] or reset with [`PQTree::clear_set_a`].
//!
//! Leaves are the only nodes that own vertices; an inner node's `set_b` is always the
//! union of its children's, and no vertex occurs twice within one tree.
//!
//! Sections cut out of a chain and nodes replaced by [`PQTree::collapse`] are released,
//! and their slots are handed out again by later allocations. A released handle must not
//! be used; [`PQTree::contains`] tells whether a handle is still live.

mod node;

pub use node::{End, Kind, Leaf, PNode, PQId, QNode, QSection, Shape};

use crate::err::{PQError, Result, Violation};
use indexmap::IndexSet;
use lexint_utils::{
    arena::ArenaSlab,
    ring::{Ring, Unlinked},
};
use node::PQNode;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct PQTree<T> {
    nodes: ArenaSlab<PQId, PQNode<T>>,
    ring: Ring<PQId>,
    root: Option<PQId>,
    pending: IndexSet<PQId>,
}

impl<T: Hash + Eq + Clone> Default for PQTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> PQTree<T> {
    pub fn new() -> Self {
        PQTree {
            nodes: ArenaSlab::default(),
            ring: Ring::new(),
            root: None,
            pending: IndexSet::new(),
        }
    }

    /* ------------------------------ Construction ------------------------------ */

    /// A detached leaf holding `vertices`.
    pub fn leaf(&mut self, vertices: impl IntoIterator<Item = T>) -> PQId {
        self.nodes.alloc(PQNode::new(Leaf, vertices.into_iter().collect()))
    }

    /// A detached P-node without children.
    pub fn p_node(&mut self) -> PQId {
        self.nodes.alloc(PQNode::new(PNode::default(), IndexSet::new()))
    }

    /// A detached Q-node without sections.
    pub fn q_node(&mut self) -> PQId {
        self.nodes.alloc(PQNode::new(QNode::default(), IndexSet::new()))
    }

    pub fn root(&self) -> Option<PQId> {
        self.root
    }

    pub fn set_root(&mut self, id: PQId) -> Result<()> {
        if self.nodes[&id].parent.is_some() {
            return Err(PQError::AlreadyAttached(id));
        }
        self.root = Some(id);
        Ok(())
    }

    /* --------------------------------- Access --------------------------------- */

    pub fn contains(&self, id: PQId) -> bool {
        self.nodes.contains(&id)
    }

    /// Number of live nodes, sections included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn kind(&self, id: PQId) -> Kind {
        self.nodes[&id].shape.kind()
    }

    pub fn parent(&self, id: PQId) -> Option<PQId> {
        self.nodes[&id].parent
    }

    pub fn set_a(&self, id: PQId) -> &IndexSet<T> {
        &self.nodes[&id].set_a
    }

    pub fn set_b(&self, id: PQId) -> &IndexSet<T> {
        &self.nodes[&id].set_b
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn has_at_most_one_son(&self, id: PQId) -> bool {
        match &self.nodes[&id].shape {
            | Shape::Leaf(_) | Shape::Section(_) => true,
            | Shape::P(p) => p.len <= 1,
            | Shape::Q(q) => q.leftmost == q.rightmost,
        }
    }

    /// Direct children: ring order from the current child for a P-node, sections from left
    /// to right for a Q-node, the carried child for a section.
    pub fn children(&self, id: PQId) -> Vec<PQId> {
        match &self.nodes[&id].shape {
            | Shape::Leaf(_) => Vec::new(),
            | Shape::P(p) => match p.current {
                | Some(cur) => self.ring.iter_from(cur).map(|(_, c)| *c).collect(),
                | None => Vec::new(),
            },
            | Shape::Q(q) => {
                let mut sections = Vec::new();
                let mut cursor = q.leftmost;
                while let Some(s) = cursor {
                    sections.push(s);
                    cursor = match &self.nodes[&s].shape {
                        | Shape::Section(sec) => sec.right,
                        | _ => None,
                    };
                }
                sections
            }
            | Shape::Section(sec) => vec![sec.child],
        }
    }

    fn p_ref(&self, id: PQId) -> Result<&PNode> {
        match &self.nodes[&id].shape {
            | Shape::P(p) => Ok(p),
            | other => Err(PQError::WrongKind { node: id, expected: Kind::P, found: other.kind() }),
        }
    }
    fn p_mut(&mut self, id: PQId) -> Result<&mut PNode> {
        match &mut self.nodes[&id].shape {
            | Shape::P(p) => Ok(p),
            | other => Err(PQError::WrongKind { node: id, expected: Kind::P, found: other.kind() }),
        }
    }
    fn q_ref(&self, id: PQId) -> Result<&QNode> {
        match &self.nodes[&id].shape {
            | Shape::Q(q) => Ok(q),
            | other => Err(PQError::WrongKind { node: id, expected: Kind::Q, found: other.kind() }),
        }
    }
    fn q_mut(&mut self, id: PQId) -> Result<&mut QNode> {
        match &mut self.nodes[&id].shape {
            | Shape::Q(q) => Ok(q),
            | other => Err(PQError::WrongKind { node: id, expected: Kind::Q, found: other.kind() }),
        }
    }
    fn section_ref(&self, id: PQId) -> Result<&QSection> {
        match &self.nodes[&id].shape {
            | Shape::Section(s) => Ok(s),
            | other => {
                Err(PQError::WrongKind { node: id, expected: Kind::Section, found: other.kind() })
            }
        }
    }
    fn section_mut(&mut self, id: PQId) -> Result<&mut QSection> {
        match &mut self.nodes[&id].shape {
            | Shape::Section(s) => Ok(s),
            | other => {
                Err(PQError::WrongKind { node: id, expected: Kind::Section, found: other.kind() })
            }
        }
    }

    /* ---------------------------- Vertex bookkeeping --------------------------- */

    fn settled(&self) -> Result<()> {
        match self.pending.first() {
            | Some(&id) => Err(PQError::PendingRefinement(id)),
            | None => Ok(()),
        }
    }

    fn top(&self, mut id: PQId) -> PQId {
        while let Some(p) = self.nodes[&id].parent {
            id = p;
        }
        id
    }

    fn check_attachable(&self, parent: PQId, child: PQId) -> Result<()> {
        if self.nodes[&child].parent.is_some() || self.root == Some(child) {
            return Err(PQError::AlreadyAttached(child));
        }
        let mut cursor = Some(parent);
        while let Some(a) = cursor {
            if a == child {
                return Err(PQError::WouldCycle { parent, child });
            }
            cursor = self.nodes[&a].parent;
        }
        let present = &self.nodes[&self.top(parent)].set_b;
        if self.nodes[&child].set_b.iter().any(|v| present.contains(v)) {
            return Err(PQError::DuplicateVertex(child));
        }
        Ok(())
    }

    fn grow_upward(&mut self, from: PQId, vertices: &[T]) {
        let mut cursor = Some(from);
        while let Some(a) = cursor {
            let node = &mut self.nodes[&a];
            node.set_b.extend(vertices.iter().cloned());
            cursor = node.parent;
        }
    }

    fn shrink_upward(&mut self, from: PQId, vertices: &[T]) {
        let mut cursor = Some(from);
        while let Some(a) = cursor {
            let node = &mut self.nodes[&a];
            for v in vertices {
                node.set_b.swap_remove(v);
            }
            cursor = node.parent;
        }
    }

    fn vertices_of(&self, id: PQId) -> Vec<T> {
        self.nodes[&id].set_b.iter().cloned().collect()
    }

    /* --------------------------------- P-nodes -------------------------------- */

    /// Attach a detached `child` to the P-node `p`, just before the current child, i.e.
    /// last in a walk starting from the current child.
    pub fn add_child(&mut self, p: PQId, child: PQId) -> Result<()> {
        self.settled()?;
        let current = self.p_ref(p)?.current;
        self.check_attachable(p, child)?;
        let slot = match current {
            | Some(cur) => self.ring.add_prev(cur, child),
            | None => self.ring.singleton(child),
        };
        let pn = self.p_mut(p)?;
        pn.current.get_or_insert(slot);
        pn.len += 1;
        let node = &mut self.nodes[&child];
        node.parent = Some(p);
        node.slot = Some(slot);
        let vertices = self.vertices_of(child);
        self.grow_upward(p, &vertices);
        Ok(())
    }

    pub fn current_child(&self, p: PQId) -> Result<Option<PQId>> {
        Ok(self.p_ref(p)?.current.map(|cur| *self.ring.element(cur)))
    }

    /// Move the current mark one step around the ring.
    pub fn advance(&mut self, p: PQId) -> Result<Option<PQId>> {
        let next = self.p_ref(p)?.current.map(|cur| self.ring.next(cur));
        self.p_mut(p)?.current = next;
        self.current_child(p)
    }

    /// Detach the current child; its successor becomes current. A P-node without
    /// children is left as it is.
    pub fn remove_current_child(&mut self, p: PQId) -> Result<Option<PQId>> {
        self.settled()?;
        let Some(cur) = self.p_ref(p)?.current else { return Ok(None) };
        let Unlinked { element: child, rest } = self.ring.remove(cur);
        let pn = self.p_mut(p)?;
        pn.current = rest;
        pn.len -= 1;
        let node = &mut self.nodes[&child];
        node.parent = None;
        node.slot = None;
        let vertices = self.vertices_of(child);
        self.shrink_upward(p, &vertices);
        Ok(Some(child))
    }

    /* --------------------------------- Q-nodes -------------------------------- */

    /// Attach a detached `child` to the Q-node `q` in a fresh section at `end`.
    pub fn push_section(&mut self, q: PQId, child: PQId, end: End) -> Result<PQId> {
        self.settled()?;
        let qn = self.q_ref(q)?;
        let (left, right) = match end {
            | End::Left => (None, qn.leftmost),
            | End::Right => (qn.rightmost, None),
        };
        self.check_attachable(q, child)?;
        let vertices = self.vertices_of(child);
        let mut section =
            PQNode::new(QSection { child, left, right }, vertices.iter().cloned().collect());
        section.parent = Some(q);
        let s = self.nodes.alloc(section);
        if let Some(l) = left {
            self.section_mut(l)?.right = Some(s);
        }
        if let Some(r) = right {
            self.section_mut(r)?.left = Some(s);
        }
        let qn = self.q_mut(q)?;
        match end {
            | End::Left => {
                qn.leftmost = Some(s);
                qn.rightmost.get_or_insert(s);
            }
            | End::Right => {
                qn.rightmost = Some(s);
                qn.leftmost.get_or_insert(s);
            }
        }
        self.nodes[&child].parent = Some(s);
        self.grow_upward(q, &vertices);
        Ok(s)
    }

    /// Sections of `q` from left to right.
    pub fn sections(&self, q: PQId) -> Result<Vec<PQId>> {
        self.q_ref(q)?;
        Ok(self.children(q))
    }

    pub fn section_child(&self, s: PQId) -> Result<PQId> {
        Ok(self.section_ref(s)?.child)
    }

    /// Cut section `s` out of its chain and release it. Its child is returned still
    /// pointing at the released slot.
    fn unlink_section(&mut self, s: PQId) -> Result<(PQId, PQId)> {
        let QSection { child, left, right } = self.section_ref(s)?.clone();
        let q = self.nodes[&s].parent.ok_or(PQError::Detached(s))?;
        if let Some(l) = left {
            self.section_mut(l)?.right = right;
        }
        if let Some(r) = right {
            self.section_mut(r)?.left = left;
        }
        let qn = self.q_mut(q)?;
        if qn.leftmost == Some(s) {
            qn.leftmost = right;
        }
        if qn.rightmost == Some(s) {
            qn.rightmost = left;
        }
        self.nodes.remove(&s);
        Ok((q, child))
    }

    /// Remove section `s` from its Q-node and return the detached child.
    pub fn remove_section(&mut self, s: PQId) -> Result<PQId> {
        self.settled()?;
        let (q, child) = self.unlink_section(s)?;
        self.nodes[&child].parent = None;
        let vertices = self.vertices_of(child);
        self.shrink_upward(q, &vertices);
        Ok(child)
    }

    /* -------------------------------- Collapse -------------------------------- */

    /// Replace an inner node that has at most one son by that son, in place. A node with
    /// no son at all disappears from its parent. The collapsed node is released. Returns
    /// the replacement.
    pub fn collapse(&mut self, id: PQId) -> Result<Option<PQId>> {
        self.settled()?;
        if !self.has_at_most_one_son(id) {
            return Err(PQError::NotCollapsible(id));
        }
        let only = match self.kind(id) {
            | Kind::P => {
                let pn = self.p_mut(id)?;
                pn.len = 0;
                let current = pn.current.take();
                current.map(|cur| self.ring.remove(cur).element)
            }
            | Kind::Q => match self.q_ref(id)?.leftmost {
                | Some(s) => Some(self.unlink_section(s)?.1),
                | None => None,
            },
            | Kind::Leaf | Kind::Section => return Err(PQError::NotCollapsible(id)),
        };
        if let Some(o) = only {
            let node = &mut self.nodes[&o];
            node.parent = None;
            node.slot = None;
        }
        let Some(node) = self.nodes.remove(&id) else { return Err(PQError::Detached(id)) };
        let (parent, slot) = (node.parent, node.slot);
        let Some(parent) = parent else {
            if self.root == Some(id) {
                self.root = only;
            }
            return Ok(only);
        };
        match self.kind(parent) {
            | Kind::P => {
                let slot = slot.ok_or(PQError::Detached(id))?;
                match only {
                    | Some(o) => {
                        *self.ring.element_mut(slot) = o;
                        let node = &mut self.nodes[&o];
                        node.parent = Some(parent);
                        node.slot = Some(slot);
                    }
                    | None => {
                        let Unlinked { rest, .. } = self.ring.remove(slot);
                        let pn = self.p_mut(parent)?;
                        if pn.current == Some(slot) {
                            pn.current = rest;
                        }
                        pn.len -= 1;
                    }
                }
            }
            | Kind::Section => match only {
                | Some(o) => {
                    self.section_mut(parent)?.child = o;
                    self.nodes[&o].parent = Some(parent);
                }
                | None => {
                    self.unlink_section(parent)?;
                }
            },
            | found @ (Kind::Leaf | Kind::Q) => {
                return Err(PQError::WrongKind { node: parent, expected: Kind::P, found });
            }
        }
        Ok(only)
    }

    /* ------------------------------- Refinement ------------------------------- */

    /// Record candidates on `id`; the tree stays pending until they are committed or
    /// cleared.
    pub fn add_to_set_a(&mut self, id: PQId, vertices: impl IntoIterator<Item = T>) {
        let node = &mut self.nodes[&id];
        node.set_a.extend(vertices);
        if !node.set_a.is_empty() {
            self.pending.insert(id);
        }
    }

    /// Commit the candidates of `id`. A leaf takes them over as its own vertices; an inner
    /// node can only confirm vertices one of its leaves already holds.
    pub fn add_set_a_to_set_b(&mut self, id: PQId) -> Result<()> {
        let node = &self.nodes[&id];
        let fresh =
            node.set_a.iter().filter(|v| !node.set_b.contains(*v)).cloned().collect::<Vec<_>>();
        if !fresh.is_empty() {
            if self.kind(id) != Kind::Leaf {
                return Err(PQError::Uncommittable(id));
            }
            let present = &self.nodes[&self.top(id)].set_b;
            if fresh.iter().any(|v| present.contains(v)) {
                return Err(PQError::DuplicateVertex(id));
            }
            self.grow_upward(id, &fresh);
        }
        self.clear_set_a(id);
        Ok(())
    }

    /// Drop the candidates of `id` without committing them.
    pub fn clear_set_a(&mut self, id: PQId) {
        self.nodes[&id].set_a.clear();
        self.pending.shift_remove(&id);
    }

    /* --------------------------------- Reading -------------------------------- */

    /// Leaf vertices below `id`, left to right.
    pub fn frontier(&self, id: PQId) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_frontier(id, &mut out);
        out
    }

    fn collect_frontier(&self, id: PQId, out: &mut Vec<T>) {
        match &self.nodes[&id].shape {
            | Shape::Leaf(_) => out.extend(self.nodes[&id].set_b.iter().cloned()),
            | _ => {
                for c in self.children(id) {
                    self.collect_frontier(c, out);
                }
            }
        }
    }

    /// Check parent links, ring bookkeeping, section chains and vertex sets below `id`.
    pub fn audit(&self, id: PQId) -> std::result::Result<(), Violation> {
        let node = &self.nodes[&id];
        let children = self.children(id);
        for &c in &children {
            if self.nodes[&c].parent != Some(id) {
                return Err(Violation::ParentLink(format!("{:?}", c)));
            }
        }
        match &node.shape {
            | Shape::Leaf(_) => return Ok(()),
            | Shape::P(p) => {
                if let Some(cur) = p.current {
                    for (slot, c) in self.ring.iter_from(cur) {
                        if self.nodes[c].slot != Some(slot) {
                            return Err(Violation::ParentLink(format!("{:?}", c)));
                        }
                    }
                }
                if children.len() != p.len {
                    return Err(Violation::Length(format!("{:?}", id), p.len, children.len()));
                }
            }
            | Shape::Q(q) => {
                let mut prev = None;
                for &s in &children {
                    let Shape::Section(sec) = &self.nodes[&s].shape else {
                        return Err(Violation::SectionChain(format!("{:?}", s)));
                    };
                    if sec.left != prev {
                        return Err(Violation::SectionChain(format!("{:?}", s)));
                    }
                    prev = Some(s);
                }
                if q.rightmost != prev {
                    return Err(Violation::SectionChain(format!("{:?}", id)));
                }
            }
            | Shape::Section(_) => {}
        }
        let total = children.iter().map(|c| self.nodes[c].set_b.len()).sum::<usize>();
        let covered = children
            .iter()
            .all(|c| self.nodes[c].set_b.iter().all(|v| node.set_b.contains(v)));
        if total != node.set_b.len() || !covered {
            return Err(Violation::SetUnion(format!("{:?}", id)));
        }
        for c in children {
            self.audit(c)?;
        }
        Ok(())
    }
}
