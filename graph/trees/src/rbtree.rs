//! Red-black tree keyed by [`Interval`], augmented with the maximum end point of every
//! subtree so that overlap queries can prune whole subtrees.
//!
//! Nodes live in an [`ArenaSlab`]; slot zero is a black sentinel standing in for every
//! absent child and for the parent of the root.

use crate::{err::Violation, interval::Interval};
use lexint_utils::arena::ArenaSlab;
use std::{cmp::Ordering, fmt};

lexint_utils::new_key_type! {
    struct NodeId;
}

const NIL: NodeId = NodeId(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// Direction of a child, or of a rotation: rotating `x` to the left moves `x` down into
/// the left child slot of its former right child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            | Side::Left => Side::Right,
            | Side::Right => Side::Left,
        }
    }
    fn slot(self) -> usize {
        match self {
            | Side::Left => 0,
            | Side::Right => 1,
        }
    }
}

#[derive(Clone, Debug)]
struct Node<T, V> {
    /// `None` only for the sentinel
    entry: Option<(Interval<T>, V)>,
    /// maximum end point within the subtree
    high: Option<T>,
    color: Color,
    parent: NodeId,
    children: [NodeId; 2],
}

#[derive(Clone, Debug)]
pub struct IntervalTree<T, V> {
    nodes: ArenaSlab<NodeId, Node<T, V>>,
    root: NodeId,
    len: usize,
}

impl<T: Ord + Copy, V> Default for IntervalTree<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Copy, V> IntervalTree<T, V> {
    pub fn new() -> Self {
        let mut nodes = ArenaSlab::default();
        let sentinel = nodes.alloc(Node {
            entry: None,
            high: None,
            color: Color::Black,
            parent: NIL,
            children: [NIL, NIL],
        });
        debug_assert_eq!(sentinel, NIL);
        IntervalTree { nodes, root: NIL, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /* --------------------------------- Access --------------------------------- */

    fn key(&self, x: NodeId) -> &Interval<T> {
        let Some((key, _)) = &self.nodes[&x].entry else { unreachable!("sentinel has no key") };
        key
    }
    fn parent(&self, x: NodeId) -> NodeId {
        self.nodes[&x].parent
    }
    fn child(&self, x: NodeId, side: Side) -> NodeId {
        self.nodes[&x].children[side.slot()]
    }
    fn set_child(&mut self, x: NodeId, side: Side, c: NodeId) {
        self.nodes[&x].children[side.slot()] = c;
    }
    fn set_parent(&mut self, x: NodeId, p: NodeId) {
        self.nodes[&x].parent = p;
    }
    fn is_red(&self, x: NodeId) -> bool {
        self.nodes[&x].color == Color::Red
    }
    fn paint(&mut self, x: NodeId, color: Color) {
        if x != NIL {
            self.nodes[&x].color = color;
        }
    }
    /// Which child of its parent `x` is. The sentinel may stand for either slot; during
    /// removal its sibling is never the sentinel as well, so the answer is unambiguous.
    fn side_of(&self, x: NodeId) -> Side {
        if self.child(self.parent(x), Side::Left) == x { Side::Left } else { Side::Right }
    }

    fn search(&self, key: &Interval<T>) -> Option<NodeId> {
        let mut x = self.root;
        while x != NIL {
            x = match key.cmp(self.key(x)) {
                | Ordering::Equal => return Some(x),
                | Ordering::Less => self.child(x, Side::Left),
                | Ordering::Greater => self.child(x, Side::Right),
            };
        }
        None
    }

    fn minimum(&self, mut x: NodeId) -> NodeId {
        while self.child(x, Side::Left) != NIL {
            x = self.child(x, Side::Left);
        }
        x
    }

    pub fn contains(&self, key: &Interval<T>) -> bool {
        self.search(key).is_some()
    }

    pub fn get(&self, key: &Interval<T>) -> Option<&V> {
        let x = self.search(key)?;
        self.nodes[&x].entry.as_ref().map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &Interval<T>) -> Option<&mut V> {
        let x = self.search(key)?;
        self.nodes[&x].entry.as_mut().map(|(_, v)| v)
    }

    /* ------------------------------ Augmentation ------------------------------ */

    fn recompute_high(&mut self, x: NodeId) {
        if x == NIL {
            return;
        }
        let high = Some(self.key(x).end())
            .max(self.nodes[&self.child(x, Side::Left)].high)
            .max(self.nodes[&self.child(x, Side::Right)].high);
        self.nodes[&x].high = high;
    }

    fn recompute_high_upward(&mut self, mut x: NodeId) {
        while x != NIL {
            self.recompute_high(x);
            x = self.parent(x);
        }
    }

    /// Rotate around `x` towards `dir`. The child on the opposite side takes the place of
    /// `x`; the subtree maxima of both nodes are re-derived, `x` first since it now sits
    /// below.
    fn rotate(&mut self, x: NodeId, dir: Side) {
        let y = self.child(x, dir.flip());
        debug_assert!(y != NIL, "rotation needs a child to lift");
        let inner = self.child(y, dir);
        self.set_child(x, dir.flip(), inner);
        if inner != NIL {
            self.set_parent(inner, x);
        }
        self.replace_in_parent(x, y);
        self.set_child(y, dir, x);
        self.set_parent(x, y);
        self.recompute_high(x);
        self.recompute_high(y);
    }

    /// Hang `v` where `u` hangs; `u` keeps its stale parent pointer.
    fn replace_in_parent(&mut self, u: NodeId, v: NodeId) {
        let p = self.parent(u);
        if p == NIL {
            self.root = v;
        } else {
            let side = self.side_of(u);
            self.set_child(p, side, v);
        }
        self.set_parent(v, p);
    }

    /* --------------------------------- Insert --------------------------------- */

    /// Insert `key`, or overwrite the value stored under an equal key and return the old
    /// one.
    pub fn insert(&mut self, key: Interval<T>, value: V) -> Option<V> {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut x = self.root;
        while x != NIL {
            side = match key.cmp(self.key(x)) {
                | Ordering::Equal => {
                    let (_, old) = self.nodes[&x].entry.as_mut()?;
                    return Some(std::mem::replace(old, value));
                }
                | Ordering::Less => Side::Left,
                | Ordering::Greater => Side::Right,
            };
            parent = x;
            x = self.child(x, side);
        }
        let z = self.nodes.alloc(Node {
            high: Some(key.end()),
            entry: Some((key, value)),
            color: Color::Red,
            parent,
            children: [NIL, NIL],
        });
        if parent == NIL {
            self.root = z;
        } else {
            self.set_child(parent, side, z);
            self.recompute_high_upward(parent);
        }
        self.insert_fixup(z);
        self.len += 1;
        None
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self.parent(z)) {
            let p = self.parent(z);
            let g = self.parent(p);
            let side = self.side_of(p);
            let uncle = self.child(g, side.flip());
            if self.is_red(uncle) {
                self.paint(p, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(g, Color::Red);
                z = g;
                continue;
            }
            if self.side_of(z) == side.flip() {
                z = p;
                self.rotate(z, side);
            }
            let p = self.parent(z);
            let g = self.parent(p);
            self.paint(p, Color::Black);
            self.paint(g, Color::Red);
            self.rotate(g, side.flip());
        }
        self.paint(self.root, Color::Black);
    }

    /* --------------------------------- Remove --------------------------------- */

    /// Remove `key` and return its value; removing an absent key changes nothing.
    pub fn remove(&mut self, key: &Interval<T>) -> Option<V> {
        let z = self.search(key)?;
        let mut removed_color = self.nodes[&z].color;
        let x;
        let touched;
        if self.child(z, Side::Left) == NIL {
            x = self.child(z, Side::Right);
            self.replace_in_parent(z, x);
            touched = self.parent(z);
        } else if self.child(z, Side::Right) == NIL {
            x = self.child(z, Side::Left);
            self.replace_in_parent(z, x);
            touched = self.parent(z);
        } else {
            let y = self.minimum(self.child(z, Side::Right));
            removed_color = self.nodes[&y].color;
            x = self.child(y, Side::Right);
            if self.parent(y) == z {
                self.set_parent(x, y);
                touched = y;
            } else {
                touched = self.parent(y);
                self.replace_in_parent(y, x);
                let right = self.child(z, Side::Right);
                self.set_child(y, Side::Right, right);
                self.set_parent(right, y);
            }
            self.replace_in_parent(z, y);
            let left = self.child(z, Side::Left);
            self.set_child(y, Side::Left, left);
            self.set_parent(left, y);
            self.nodes[&y].color = self.nodes[&z].color;
        }
        self.recompute_high_upward(touched);
        if removed_color == Color::Black {
            self.remove_fixup(x);
        }
        self.set_parent(NIL, NIL);
        self.len -= 1;
        let (_, value) = self.nodes.remove(&z)?.entry?;
        Some(value)
    }

    fn remove_fixup(&mut self, mut x: NodeId) {
        while x != self.root && !self.is_red(x) {
            let side = self.side_of(x);
            let mut w = self.child(self.parent(x), side.flip());
            if self.is_red(w) {
                self.paint(w, Color::Black);
                self.paint(self.parent(x), Color::Red);
                self.rotate(self.parent(x), side);
                w = self.child(self.parent(x), side.flip());
            }
            if !self.is_red(self.child(w, Side::Left)) && !self.is_red(self.child(w, Side::Right)) {
                self.paint(w, Color::Red);
                x = self.parent(x);
                continue;
            }
            if !self.is_red(self.child(w, side.flip())) {
                self.paint(self.child(w, side), Color::Black);
                self.paint(w, Color::Red);
                self.rotate(w, side.flip());
                w = self.child(self.parent(x), side.flip());
            }
            let p = self.parent(x);
            self.nodes[&w].color = self.nodes[&p].color;
            self.paint(p, Color::Black);
            self.paint(self.child(w, side.flip()), Color::Black);
            self.rotate(p, side);
            x = self.root;
        }
        self.paint(x, Color::Black);
    }

    /* --------------------------------- Queries -------------------------------- */

    /// All stored intervals that overlap `query`, in key order.
    pub fn overlap_query(&self, query: &Interval<T>) -> Vec<(&Interval<T>, &V)> {
        let mut found = Vec::new();
        self.collect_overlaps(self.root, query, &mut found);
        found
    }

    fn collect_overlaps<'a>(
        &'a self, x: NodeId, query: &Interval<T>, found: &mut Vec<(&'a Interval<T>, &'a V)>,
    ) {
        // nothing below ends at or after the query's start
        if x == NIL || self.nodes[&x].high < Some(query.start()) {
            return;
        }
        self.collect_overlaps(self.child(x, Side::Left), query, found);
        let Some((key, value)) = &self.nodes[&x].entry else { return };
        if key.overlaps(query) {
            found.push((key, value));
        }
        // everything to the right starts at or after `key`
        if key.start() <= query.end() {
            self.collect_overlaps(self.child(x, Side::Right), query, found);
        }
    }

    /// All stored intervals containing `point`, in key order.
    pub fn stabbing_query(&self, point: T) -> Vec<(&Interval<T>, &V)> {
        self.overlap_query(&Interval::point(point))
    }

    pub fn iter(&self) -> Iter<'_, T, V> {
        let mut iter = Iter { tree: self, stack: Vec::new() };
        iter.descend(self.root);
        iter
    }

    pub fn inorder_keys(&self) -> Vec<Interval<T>> {
        self.iter().map(|(k, _)| *k).collect()
    }

    pub fn inorder_values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }
}

pub struct Iter<'a, T, V> {
    tree: &'a IntervalTree<T, V>,
    stack: Vec<NodeId>,
}

impl<T: Ord + Copy, V> Iter<'_, T, V> {
    fn descend(&mut self, mut x: NodeId) {
        while x != NIL {
            self.stack.push(x);
            x = self.tree.child(x, Side::Left);
        }
    }
}

impl<'a, T: Ord + Copy, V> Iterator for Iter<'a, T, V> {
    type Item = (&'a Interval<T>, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let x = self.stack.pop()?;
        self.descend(tree.child(x, Side::Right));
        let (key, value) = tree.nodes[&x].entry.as_ref()?;
        Some((key, value))
    }
}

impl<T: Ord + Copy, V> FromIterator<(Interval<T>, V)> for IntervalTree<T, V> {
    fn from_iter<I: IntoIterator<Item = (Interval<T>, V)>>(iter: I) -> Self {
        let mut tree = IntervalTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Copy, V> Extend<(Interval<T>, V)> for IntervalTree<T, V> {
    fn extend<I: IntoIterator<Item = (Interval<T>, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/* ---------------------------------- Audit --------------------------------- */

impl<T: Ord + Copy + fmt::Debug, V> IntervalTree<T, V> {
    /// Check every structural invariant: key order, parent links, subtree maxima, colors
    /// and black heights.
    pub fn audit(&self) -> Result<(), Violation> {
        self.audit_shape()?;
        if self.is_red(self.root) {
            return Err(Violation::RedRoot);
        }
        self.black_height(self.root)?;
        Ok(())
    }

    /// The color-independent part of [`audit`](Self::audit).
    fn audit_shape(&self) -> Result<(), Violation> {
        if self.parent(self.root) != NIL {
            return Err(Violation::ParentLink(self.describe(self.root)));
        }
        let keys = self.inorder_keys();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(Violation::KeyOrder(format!("{:?}", pair[1])));
        }
        if keys.len() != self.len {
            return Err(Violation::Length("tree".to_owned(), self.len, keys.len()));
        }
        self.audit_links(self.root)
    }

    fn audit_links(&self, x: NodeId) -> Result<(), Violation> {
        if x == NIL {
            return Ok(());
        }
        let mut high = Some(self.key(x).end());
        for side in [Side::Left, Side::Right] {
            let c = self.child(x, side);
            if c == NIL {
                continue;
            }
            if self.parent(c) != x {
                return Err(Violation::ParentLink(self.describe(c)));
            }
            self.audit_links(c)?;
            high = high.max(self.nodes[&c].high);
        }
        if self.nodes[&x].high != high {
            return Err(Violation::StaleHigh(self.describe(x)));
        }
        Ok(())
    }

    fn black_height(&self, x: NodeId) -> Result<usize, Violation> {
        if x == NIL {
            return Ok(1);
        }
        let red = self.is_red(x);
        let [l, r] = self.nodes[&x].children;
        if red && (self.is_red(l) || self.is_red(r)) {
            return Err(Violation::RedRed(self.describe(x)));
        }
        let (hl, hr) = (self.black_height(l)?, self.black_height(r)?);
        if hl != hr {
            return Err(Violation::BlackHeight(self.describe(x)));
        }
        Ok(hl + usize::from(!red))
    }

    fn describe(&self, x: NodeId) -> String {
        match &self.nodes[&x].entry {
            | Some((key, _)) => format!("{:?}", key),
            | None => format!("{:?}", x),
        }
    }
}
