//! Lexicographic breadth-first search.
//!
//! All three sweeps share one partition-refinement engine ([`refine`]) and differ only in
//! how ties within the leading label class are broken:
//!
//! - [`lex_bfs`] prefers the vertex that comes first in the graph's vertex order;
//! - [`lex_bfs_plus`] prefers the vertex ranked latest by a prior ordering;
//! - [`lex_bfs_star`] weighs the latest vertices of two prior orderings against each
//!   other through their later neighbourhoods.

pub(crate) mod refine;

use crate::{
    err::Result,
    graph::{Snapshot, UndirectedGraph},
    order::{DenseOrder, VertexOrdering},
};
use refine::{Tie, sweep};
use std::{fmt::Debug, hash::Hash};

pub(crate) fn plain(adj: &[Vec<usize>], start: Option<usize>) -> DenseOrder {
    let n = adj.len();
    let prio = (0..n).map(|v| n - 1 - v).collect::<Vec<_>>();
    DenseOrder::new(sweep(adj, &[&prio], start, Tie::Head))
}

pub(crate) fn plus(adj: &[Vec<usize>], start: Option<usize>, prior: &DenseOrder) -> DenseOrder {
    DenseOrder::new(sweep(adj, &[&prior.rank], start, Tie::Head))
}

pub(crate) fn star(
    adj: &[Vec<usize>], start: Option<usize>, a: &DenseOrder, b: &DenseOrder,
) -> DenseOrder {
    DenseOrder::new(sweep(adj, &[&a.rank, &b.rank], start, Tie::Star))
}

fn start_index<V: Copy + Eq + Hash + Debug>(
    snap: &Snapshot<V>, start: Option<V>,
) -> Result<Option<usize>> {
    start.map(|v| snap.index_of(&v)).transpose()
}

/// Plain LexBFS from `start`, or from the first vertex of the graph.
pub fn lex_bfs<G: UndirectedGraph>(
    graph: &G, start: Option<G::Vertex>,
) -> Result<VertexOrdering<G::Vertex>> {
    let snap = Snapshot::take(graph);
    let start = start_index(&snap, start)?;
    Ok(snap.ordering(&plain(&snap.adj, start)))
}

/// LBFS+: ties go to the vertex ranked latest by `prior`, which must rank exactly the
/// vertices of the graph. Without `start` the sweep opens with `prior`'s end vertex.
pub fn lex_bfs_plus<G: UndirectedGraph>(
    graph: &G, start: Option<G::Vertex>, prior: &VertexOrdering<G::Vertex>,
) -> Result<VertexOrdering<G::Vertex>> {
    let snap = Snapshot::take(graph);
    let prior = snap.dense(prior)?;
    let start = start_index(&snap, start)?;
    Ok(snap.ordering(&plus(&snap.adj, start, &prior)))
}

/// LBFS*: among the tied vertices let `α` be the one ranked latest by `a` and `β` the one
/// ranked latest by `b`. With `A(v)` the neighbours `a` ranks after `v` and `B(v)` the
/// neighbours `b` ranks after `v`, `α` is taken when `A(α) ⊆ B(β)` and `β` otherwise.
/// An explicit `start` replaces the first choice.
pub fn lex_bfs_star<G: UndirectedGraph>(
    graph: &G, start: Option<G::Vertex>, a: &VertexOrdering<G::Vertex>,
    b: &VertexOrdering<G::Vertex>,
) -> Result<VertexOrdering<G::Vertex>> {
    let snap = Snapshot::take(graph);
    let (a, b) = (snap.dense(a)?, snap.dense(b)?);
    let start = start_index(&snap, start)?;
    Ok(snap.ordering(&star(&snap.adj, start, &a, &b)))
}
