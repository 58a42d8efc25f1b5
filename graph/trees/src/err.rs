use crate::pqtree::{Kind, PQId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("malformed interval: start {start} lies after end {end}")]
    Malformed { start: String, end: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PQError {
    #[error("{node:?} is a {found} node where a {expected} node is required")]
    WrongKind { node: PQId, expected: Kind, found: Kind },
    #[error("{0:?} is already attached")]
    AlreadyAttached(PQId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: PQId, child: PQId },
    #[error("vertex set of {0:?} overlaps vertices already in its tree")]
    DuplicateVertex(PQId),
    #[error("{0:?} is detached from any tree")]
    Detached(PQId),
    #[error("{0:?} cannot be collapsed")]
    NotCollapsible(PQId),
    #[error("{0:?} holds candidates that none of its leaves carry")]
    Uncommittable(PQId),
    #[error("{0:?} has a pending refinement; commit or clear it first")]
    PendingRefinement(PQId),
}

/// A broken structural invariant, reported by the `audit` methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("root is red")]
    RedRoot,
    #[error("red node {0} has a red child")]
    RedRed(String),
    #[error("black height differs below {0}")]
    BlackHeight(String),
    #[error("key {0} is out of order")]
    KeyOrder(String),
    #[error("stale subtree maximum at {0}")]
    StaleHigh(String),
    #[error("broken parent link at {0}")]
    ParentLink(String),
    #[error("broken section chain at {0}")]
    SectionChain(String),
    #[error("vertex set of {0} differs from the union of its children")]
    SetUnion(String),
    #[error("{0} counts {1} entries but holds {2}")]
    Length(String, usize, usize),
}

pub type Result<T> = std::result::Result<T, PQError>;
