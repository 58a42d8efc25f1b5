//! Interval graph recognition.
//!
//! A graph is handed over through [`UndirectedGraph`](graph::UndirectedGraph); six LexBFS
//! sweeps produce an ordering that is umbrella-free exactly when the graph is an interval
//! graph, and such an ordering yields an [`IntervalModel`](model::IntervalModel) directly.

#![allow(clippy::style)]

pub mod conf;
pub mod err;
pub mod graph;
pub mod lexbfs;
pub mod model;
pub mod order;
pub mod recog;
pub mod umbrella;

pub use conf::RecogConf;
pub use err::*;
pub use recog::{IntervalGraphRecognizer, interval_model, is_interval_graph};

pub mod prelude {
    pub use crate::{
        conf::{RecogConf, StartPolicy},
        err::{ConfError, RecogError},
        graph::{SimpleGraph, UndirectedGraph},
        lexbfs::{lex_bfs, lex_bfs_plus, lex_bfs_star},
        model::IntervalModel,
        order::VertexOrdering,
        recog::{IntervalGraphRecognizer, interval_model, is_interval_graph},
        umbrella::{Umbrella, find_umbrella, umbrella_free},
    };
}
