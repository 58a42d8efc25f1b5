use crate::err::{RecogError, Result};
use indexmap::IndexSet;
use std::{fmt::Debug, hash::Hash};

/// A bijection between vertices and the ranks `0..n`, read-only once built.
#[derive(Clone, Debug)]
pub struct VertexOrdering<V: Hash + Eq> {
    order: IndexSet<V>,
}

impl<V: Copy + Eq + Hash + Debug> VertexOrdering<V> {
    /// Rank vertices in sequence order; a repeated vertex is rejected.
    pub fn from_sequence(vertices: impl IntoIterator<Item = V>) -> Result<Self> {
        let mut order = IndexSet::new();
        for v in vertices {
            if !order.insert(v) {
                return Err(RecogError::DuplicateVertex(format!("{:?}", v)));
            }
        }
        Ok(VertexOrdering { order })
    }

    pub(crate) fn from_distinct(vertices: impl IntoIterator<Item = V>) -> Self {
        let order = vertices.into_iter().collect::<IndexSet<_>>();
        VertexOrdering { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn rank(&self, v: &V) -> Option<usize> {
        self.order.get_index_of(v)
    }

    pub fn vertex_at(&self, rank: usize) -> Option<V> {
        self.order.get_index(rank).copied()
    }

    pub fn first(&self) -> Option<V> {
        self.order.first().copied()
    }

    /// The end vertex of a sweep.
    pub fn last(&self) -> Option<V> {
        self.order.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter()
    }

    pub fn to_vec(&self) -> Vec<V> {
        self.order.iter().copied().collect()
    }
}

/// Orderings are equal when they rank every vertex alike.
impl<V: Hash + Eq> PartialEq for VertexOrdering<V> {
    fn eq(&self, other: &Self) -> bool {
        self.order.iter().eq(other.order.iter())
    }
}

impl<V: Hash + Eq> Eq for VertexOrdering<V> {}

/// An ordering over dense vertex indices: `order[rank] = index`, `rank[index] = rank`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DenseOrder {
    pub(crate) order: Vec<usize>,
    pub(crate) rank: Vec<usize>,
}

impl DenseOrder {
    pub(crate) fn new(order: Vec<usize>) -> Self {
        let mut rank = vec![0; order.len()];
        for (r, &v) in order.iter().enumerate() {
            rank[v] = r;
        }
        DenseOrder { order, rank }
    }

    pub(crate) fn last(&self) -> Option<usize> {
        self.order.last().copied()
    }
}
