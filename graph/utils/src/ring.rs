//! Circular doubly-linked lists stored in a shared arena.
//!
//! Every ring node is addressed by a [`RingId`]. Several independent rings can live in one
//! [`Ring`] arena; a ring is identified by any of its nodes.

use crate::arena::{ArenaSlab, Handle};

crate::new_key_type! {
    pub struct RingId;
}

#[derive(Debug, Clone)]
struct Link<T> {
    element: T,
    prev: RingId,
    next: RingId,
}

/// Pool of circular lists.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    links: ArenaSlab<RingId, Link<T>>,
}

/// What is left after a node is removed from its ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unlinked<T> {
    /// the element carried by the removed node
    pub element: T,
    /// the former successor, or `None` if the removed node was the last one of its ring
    pub rest: Option<RingId>,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Ring<T> {
    pub fn new() -> Self {
        Ring { links: ArenaSlab::default() }
    }

    /// Start a new ring holding exactly one node, which points to itself.
    pub fn singleton(&mut self, element: T) -> RingId {
        let id = self.links.alloc(Link { element, prev: RingId::default(), next: RingId::default() });
        let link = &mut self.links[&id];
        link.prev = id;
        link.next = id;
        id
    }

    pub fn element(&self, id: RingId) -> &T {
        &self.links[&id].element
    }

    pub fn element_mut(&mut self, id: RingId) -> &mut T {
        &mut self.links[&id].element
    }

    pub fn prev(&self, id: RingId) -> RingId {
        self.links[&id].prev
    }

    pub fn next(&self, id: RingId) -> RingId {
        self.links[&id].next
    }

    /// Insert a node between `id` and its predecessor.
    pub fn add_prev(&mut self, id: RingId, element: T) -> RingId {
        let prev = self.prev(id);
        self.splice(prev, id, element)
    }

    /// Insert a node between `id` and its successor.
    pub fn add_next(&mut self, id: RingId, element: T) -> RingId {
        let next = self.next(id);
        self.splice(id, next, element)
    }

    fn splice(&mut self, prev: RingId, next: RingId, element: T) -> RingId {
        let id = self.links.alloc(Link { element, prev, next });
        self.links[&prev].next = id;
        self.links[&next].prev = id;
        id
    }

    /// Detach `id` from its ring and release its slot.
    ///
    /// Removing the only node of a ring leaves nothing behind: `rest` is `None` and no
    /// handle of that ring remains valid.
    pub fn remove(&mut self, id: RingId) -> Unlinked<T> {
        let Some(Link { element, prev, next }) = self.links.remove(&id) else {
            panic!("stale ring handle #{}", id.index())
        };
        if next == id {
            debug_assert_eq!(prev, id);
            return Unlinked { element, rest: None };
        }
        self.links[&prev].next = next;
        self.links[&next].prev = prev;
        Unlinked { element, rest: Some(next) }
    }

    pub fn contains(&self, id: RingId) -> bool {
        self.links.contains(&id)
    }

    /// Number of nodes in the ring `id` belongs to.
    pub fn ring_len(&self, id: RingId) -> usize {
        self.iter_from(id).count()
    }

    /// Walk once around the ring, starting at `id` and following `next`.
    pub fn iter_from(&self, id: RingId) -> RingIter<'_, T> {
        RingIter { ring: self, start: id, cursor: Some(id) }
    }

    /// Number of live nodes across all rings of the pool.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

pub struct RingIter<'a, T> {
    ring: &'a Ring<T>,
    start: RingId,
    cursor: Option<RingId>,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = (RingId, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let next = self.ring.next(id);
        self.cursor = if next == self.start { None } else { Some(next) };
        Some((id, self.ring.element(id)))
    }
}
