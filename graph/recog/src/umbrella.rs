//! The umbrella-free test.
//!
//! An ordering is umbrella-free when for all ranks `i < j < k`, `v_i ~ v_k` implies
//! `v_i ~ v_j`. The test below checks the equivalent block form in O(n + m): the
//! neighbours ranked after `u` occupy exactly the ranks `rank(u) + 1 ..= max`, where `max`
//! is the largest rank in the closed neighbourhood of `u`.

use crate::{
    err::Result,
    graph::{Snapshot, UndirectedGraph},
    order::{DenseOrder, VertexOrdering},
};

/// Three vertices `v_i, v_j, v_k`, ranked in this order, with `v_i ~ v_k` but not
/// `v_i ~ v_j`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Umbrella<V> {
    pub left: V,
    pub middle: V,
    pub right: V,
}

/// Largest rank in the closed neighbourhood of `u`, and the count of neighbours ranked
/// after `u`.
pub(crate) fn reach(adj: &[Vec<usize>], ord: &DenseOrder, u: usize) -> (usize, usize) {
    let r = ord.rank[u];
    adj[u].iter().map(|&w| ord.rank[w]).filter(|&rw| rw > r).fold((r, 0), |(max, later), rw| {
        (max.max(rw), later + 1)
    })
}

/// The umbrella with the earliest left end, if any.
pub(crate) fn first_umbrella(
    adj: &[Vec<usize>], ord: &DenseOrder,
) -> Option<Umbrella<usize>> {
    for &u in &ord.order {
        let r = ord.rank[u];
        let (max, later) = reach(adj, ord, u);
        if later == max - r {
            continue;
        }
        // only reached on failure: locate a rank in the block that `u` skips
        let mut hit = vec![false; ord.order.len()];
        for &w in &adj[u] {
            hit[ord.rank[w]] = true;
        }
        let gap = (r + 1..max).find(|&j| !hit[j])?;
        return Some(Umbrella { left: u, middle: ord.order[gap], right: ord.order[max] });
    }
    None
}

/// Whether `ordering`, which must rank exactly the vertices of `graph`, is umbrella-free.
pub fn umbrella_free<G: UndirectedGraph>(
    graph: &G, ordering: &VertexOrdering<G::Vertex>,
) -> Result<bool> {
    Ok(find_umbrella(graph, ordering)?.is_none())
}

/// A witness against `ordering` being umbrella-free.
pub fn find_umbrella<G: UndirectedGraph>(
    graph: &G, ordering: &VertexOrdering<G::Vertex>,
) -> Result<Option<Umbrella<G::Vertex>>> {
    let snap = Snapshot::take(graph);
    let ord = snap.dense(ordering)?;
    Ok(first_umbrella(&snap.adj, &ord).map(|Umbrella { left, middle, right }| Umbrella {
        left: snap.vertex(left),
        middle: snap.vertex(middle),
        right: snap.vertex(right),
    }))
}
