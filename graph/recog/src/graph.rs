//! The read-only graph interface consumed by recognition, and a reference implementation.

use crate::{
    err::{RecogError, Result},
    order::{DenseOrder, VertexOrdering},
};
use auto_impl::auto_impl;
use indexmap::{IndexMap, IndexSet};
use std::{fmt::Debug, hash::Hash};

/// A simple undirected graph seen through its vertices and neighbourhoods.
///
/// Neighbourhoods must be symmetric. Self-loops and repeated neighbours are tolerated and
/// ignored by recognition.
#[auto_impl(&, Box, Rc, Arc)]
pub trait UndirectedGraph {
    type Vertex: Copy + Eq + Hash + Debug;
    fn vertices(&self) -> Box<dyn Iterator<Item = Self::Vertex> + '_>;
    /// Neighbours of `v`; empty for a vertex outside the graph.
    fn neighbors(&self, v: Self::Vertex) -> Box<dyn Iterator<Item = Self::Vertex> + '_>;
    fn contains_vertex(&self, v: Self::Vertex) -> bool;
    fn has_edge(&self, u: Self::Vertex, v: Self::Vertex) -> bool;
    fn vertex_count(&self) -> usize;
    fn edge_count(&self) -> usize;
}

/* ------------------------------- SimpleGraph ------------------------------ */

/// Adjacency sets kept in insertion order, so iteration is deterministic.
#[derive(Clone, Debug)]
pub struct SimpleGraph<V: Hash + Eq> {
    adj: IndexMap<V, IndexSet<V>>,
    edges: usize,
}

impl<V: Copy + Eq + Hash + Debug> Default for SimpleGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + Eq + Hash + Debug> SimpleGraph<V> {
    pub fn new() -> Self {
        SimpleGraph { adj: IndexMap::new(), edges: 0 }
    }

    pub fn with_vertices(vertices: impl IntoIterator<Item = V>) -> Self {
        let mut graph = Self::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        graph
    }

    pub fn from_edges(edges: impl IntoIterator<Item = (V, V)>) -> Self {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Returns `false` if the vertex was already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.adj.contains_key(&v) {
            return false;
        }
        self.adj.insert(v, IndexSet::new());
        true
    }

    /// Adds both endpoints as needed. Self-loops are dropped and parallel edges merged;
    /// returns whether a new edge was created.
    pub fn add_edge(&mut self, u: V, v: V) -> bool {
        self.add_vertex(u);
        self.add_vertex(v);
        if u == v {
            return false;
        }
        let fresh = self.adj.entry(u).or_default().insert(v);
        self.adj.entry(v).or_default().insert(u);
        if fresh {
            self.edges += 1;
        }
        fresh
    }
}

impl<V: Copy + Eq + Hash + Debug> UndirectedGraph for SimpleGraph<V> {
    type Vertex = V;
    fn vertices(&self) -> Box<dyn Iterator<Item = V> + '_> {
        Box::new(self.adj.keys().copied())
    }
    fn neighbors(&self, v: V) -> Box<dyn Iterator<Item = V> + '_> {
        match self.adj.get(&v) {
            | Some(ns) => Box::new(ns.iter().copied()),
            | None => Box::new(std::iter::empty()),
        }
    }
    fn contains_vertex(&self, v: V) -> bool {
        self.adj.contains_key(&v)
    }
    fn has_edge(&self, u: V, v: V) -> bool {
        self.adj.get(&u).is_some_and(|ns| ns.contains(&v))
    }
    fn vertex_count(&self) -> usize {
        self.adj.len()
    }
    fn edge_count(&self) -> usize {
        self.edges
    }
}

/* -------------------------------- Snapshot -------------------------------- */

/// A graph copied into dense indices `0..n`, in the graph's vertex order, with
/// deduplicated loop-free adjacency lists.
#[derive(Clone, Debug)]
pub(crate) struct Snapshot<V: Hash + Eq> {
    pub(crate) vertices: IndexSet<V>,
    pub(crate) adj: Vec<Vec<usize>>,
    pub(crate) edges: usize,
}

impl<V: Copy + Eq + Hash + Debug> Snapshot<V> {
    pub(crate) fn take<G: UndirectedGraph<Vertex = V>>(graph: &G) -> Self {
        let vertices = graph.vertices().collect::<IndexSet<_>>();
        let n = vertices.len();
        let mut adj = vec![Vec::new(); n];
        let mut seen = vec![usize::MAX; n];
        let mut ends = 0;
        for (i, &v) in vertices.iter().enumerate() {
            for w in graph.neighbors(v) {
                let Some(j) = vertices.get_index_of(&w) else { continue };
                if j != i && seen[j] != i {
                    seen[j] = i;
                    adj[i].push(j);
                    ends += 1;
                }
            }
        }
        Snapshot { vertices, adj, edges: ends / 2 }
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn index_of(&self, v: &V) -> Result<usize> {
        self.vertices.get_index_of(v).ok_or_else(|| RecogError::UnknownVertex(format!("{:?}", v)))
    }

    pub(crate) fn vertex(&self, i: usize) -> V {
        self.vertices[i]
    }

    pub(crate) fn ordering(&self, dense: &DenseOrder) -> VertexOrdering<V> {
        VertexOrdering::from_distinct(dense.order.iter().map(|&i| self.vertex(i)))
    }

    /// Translate an ordering into dense indices; it must rank exactly the graph's vertices.
    pub(crate) fn dense(&self, ordering: &VertexOrdering<V>) -> Result<DenseOrder> {
        let order = ordering.iter().map(|v| self.index_of(v)).collect::<Result<Vec<_>>>()?;
        if order.len() != self.len() {
            return Err(RecogError::IncompletePriority {
                missing: self.len() - order.len(),
                expected: self.len(),
            });
        }
        Ok(DenseOrder::new(order))
    }
}
