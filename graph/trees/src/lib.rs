#![allow(clippy::style)]

pub mod err;
pub mod interval;
pub mod pqtree;
pub mod rbtree;

pub use err::*;

pub mod prelude {
    pub use crate::{
        err::{IntervalError, PQError, Violation},
        interval::Interval,
        pqtree::{End, Kind, PQId, PQTree},
        rbtree::IntervalTree,
    };
}
