use crate::{
    err::{RecogError, Result},
    graph::{SimpleGraph, Snapshot, UndirectedGraph},
    order::DenseOrder,
    umbrella::reach,
};
use indexmap::{IndexMap, IndexSet};
use lexint_trees::{interval::Interval, rbtree::IntervalTree};
use std::{fmt::Debug, hash::Hash};

/// One closed interval per vertex, over the ranks of an umbrella-free ordering. Two
/// vertices are adjacent exactly when their intervals overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalModel<V: Hash + Eq> {
    intervals: IndexMap<V, Interval<usize>>,
}

impl<V: Copy + Eq + Hash + Debug> IntervalModel<V> {
    /// Vertex `u` gets `[rank(u), max rank over its closed neighbourhood]`; vertices are
    /// listed in rank order.
    pub(crate) fn from_ordering(snap: &Snapshot<V>, ord: &DenseOrder) -> Result<Self> {
        let mut intervals = IndexMap::with_capacity(ord.order.len());
        for &u in &ord.order {
            let (max, _) = reach(&snap.adj, ord, u);
            intervals.insert(snap.vertex(u), Interval::new(ord.rank[u], max)?);
        }
        Ok(IntervalModel { intervals })
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, v: &V) -> Option<&Interval<usize>> {
        self.intervals.get(v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &Interval<usize>)> + '_ {
        self.intervals.iter()
    }

    /// Index the intervals for overlap queries. Start points are distinct ranks, so no
    /// two vertices share a key.
    pub fn to_interval_tree(&self) -> IntervalTree<usize, V> {
        self.intervals.iter().map(|(v, iv)| (*iv, *v)).collect()
    }

    /// The graph whose edges are the overlapping pairs of intervals.
    pub fn intersection_graph(&self) -> SimpleGraph<V> {
        let tree = self.to_interval_tree();
        let mut graph = SimpleGraph::with_vertices(self.intervals.keys().copied());
        for (v, iv) in &self.intervals {
            for (_, u) in tree.overlap_query(iv) {
                graph.add_edge(*v, *u);
            }
        }
        graph
    }

    /// Check the model against `graph`, vertex by vertex.
    pub fn verify<G: UndirectedGraph<Vertex = V>>(&self, graph: &G) -> Result<()> {
        let model = self.intersection_graph();
        let mismatch = |v: &V| RecogError::ModelMismatch(format!("{:?}", v));
        if graph.vertex_count() != model.vertex_count() {
            let stray = graph.vertices().find(|v| !model.contains_vertex(*v));
            return Err(match stray {
                | Some(v) => mismatch(&v),
                | None => RecogError::ModelMismatch("<vertex count>".to_owned()),
            });
        }
        for v in graph.vertices() {
            if !model.contains_vertex(v) {
                return Err(mismatch(&v));
            }
            let expected = graph.neighbors(v).filter(|w| *w != v).collect::<IndexSet<_>>();
            let found = model.neighbors(v).collect::<IndexSet<_>>();
            if expected.len() != found.len() || !found.iter().all(|w| expected.contains(w)) {
                return Err(mismatch(&v));
            }
        }
        Ok(())
    }
}
