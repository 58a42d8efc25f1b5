#![allow(clippy::style)]

pub mod arena;
pub mod ring;

pub mod prelude {
    /// Data structures.
    pub use crate::{
        arena::*,
        ring::{Ring, RingId, Unlinked},
    };
}
