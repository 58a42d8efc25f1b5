//! Interval graph recognition by six LexBFS sweeps.
//!
//! | sweep | kind  | opens with       | ties broken by |
//! |-------|-------|------------------|----------------|
//! | 0     | plain | configured start | vertex order   |
//! | 1     | LBFS+ | end of sweep 0   | sweep 0        |
//! | 2     | LBFS+ | end of sweep 1   | sweep 1        |
//! | 3     | LBFS+ | end of sweep 2   | sweep 2        |
//! | 4     | LBFS+ | end of sweep 3   | sweep 3        |
//! | 5     | LBFS* | end of sweep 3   | sweeps 3 and 4 |
//!
//! The graph is an interval graph exactly when the last ordering is umbrella-free.

use crate::{
    conf::{RecogConf, StartPolicy},
    err::{RecogError, Result},
    graph::{Snapshot, UndirectedGraph},
    lexbfs,
    model::IntervalModel,
    order::{DenseOrder, VertexOrdering},
    umbrella::{Umbrella, first_umbrella},
};
use std::{fmt::Debug, hash::Hash};

pub const SWEEPS: usize = 6;

#[derive(Clone, Debug)]
pub struct IntervalGraphRecognizer<V: Hash + Eq> {
    sweeps: [VertexOrdering<V>; SWEEPS],
    verdict: Verdict<V>,
}

#[derive(Clone, Debug)]
enum Verdict<V: Hash + Eq> {
    Interval(IntervalModel<V>),
    Umbrella(Umbrella<V>),
}

impl<V: Copy + Eq + Hash + Debug> IntervalGraphRecognizer<V> {
    pub fn new<G: UndirectedGraph<Vertex = V>>(graph: &G) -> Result<Self> {
        Self::with_conf(graph, &RecogConf::default())
    }

    pub fn with_conf<G: UndirectedGraph<Vertex = V>>(graph: &G, conf: &RecogConf) -> Result<Self> {
        let snap = Snapshot::take(graph);
        let n = snap.len();
        log::debug!("recognizing a graph with {} vertices and {} edges", n, snap.edges);
        conf.check_limits(n, snap.edges)?;

        let start = match conf.start {
            | StartPolicy::First => None,
            | StartPolicy::Last => n.checked_sub(1),
        };
        let adj = &snap.adj;
        let s0 = lexbfs::plain(adj, start);
        let s1 = lexbfs::plus(adj, s0.last(), &s0);
        let s2 = lexbfs::plus(adj, s1.last(), &s1);
        let s3 = lexbfs::plus(adj, s2.last(), &s2);
        let s4 = lexbfs::plus(adj, s3.last(), &s3);
        let s5 = lexbfs::star(adj, s3.last(), &s3, &s4);
        let dense = [s0, s1, s2, s3, s4, s5];
        for (i, sweep) in dense.iter().enumerate() {
            log::debug!("sweep {} ends at {:?}", i, sweep.last().map(|v| snap.vertex(v)));
            log::trace!("sweep {}: {:?}", i, sweep_vertices(&snap, sweep));
        }

        let last = &dense[SWEEPS - 1];
        let verdict = match first_umbrella(adj, last) {
            | Some(Umbrella { left, middle, right }) => {
                let umbrella = Umbrella {
                    left: snap.vertex(left),
                    middle: snap.vertex(middle),
                    right: snap.vertex(right),
                };
                log::debug!("not an interval graph; umbrella {:?}", umbrella);
                Verdict::Umbrella(umbrella)
            }
            | None => {
                let model = IntervalModel::from_ordering(&snap, last)?;
                if conf.verify_model {
                    model.verify(graph).inspect_err(|err| log::warn!("{}", err))?;
                }
                log::debug!("interval graph");
                Verdict::Interval(model)
            }
        };
        let sweeps = dense.map(|sweep| snap.ordering(&sweep));
        Ok(IntervalGraphRecognizer { sweeps, verdict })
    }

    pub fn is_interval(&self) -> bool {
        matches!(self.verdict, Verdict::Interval(_))
    }

    /// The ordering of the final sweep.
    pub fn ordering(&self) -> &VertexOrdering<V> {
        &self.sweeps[SWEEPS - 1]
    }

    /// All sweep orderings, first to last.
    pub fn sweeps(&self) -> &[VertexOrdering<V>; SWEEPS] {
        &self.sweeps
    }

    pub fn model(&self) -> Option<&IntervalModel<V>> {
        match &self.verdict {
            | Verdict::Interval(model) => Some(model),
            | Verdict::Umbrella(_) => None,
        }
    }

    /// The first umbrella of the final ordering, when the graph is not an interval graph.
    pub fn umbrella(&self) -> Option<&Umbrella<V>> {
        match &self.verdict {
            | Verdict::Interval(_) => None,
            | Verdict::Umbrella(umbrella) => Some(umbrella),
        }
    }

    pub fn into_model(self) -> Result<IntervalModel<V>> {
        match self.verdict {
            | Verdict::Interval(model) => Ok(model),
            | Verdict::Umbrella(_) => Err(RecogError::NotInterval),
        }
    }
}

fn sweep_vertices<V: Copy + Eq + Hash + Debug>(snap: &Snapshot<V>, sweep: &DenseOrder) -> Vec<V> {
    sweep.order.iter().map(|&i| snap.vertex(i)).collect()
}

pub fn is_interval_graph<G: UndirectedGraph>(graph: &G) -> bool {
    IntervalGraphRecognizer::new(graph).is_ok_and(|recog| recog.is_interval())
}

/// An interval model of `graph`, or [`RecogError::NotInterval`].
pub fn interval_model<G: UndirectedGraph>(graph: &G) -> Result<IntervalModel<G::Vertex>> {
    IntervalGraphRecognizer::new(graph)?.into_model()
}
