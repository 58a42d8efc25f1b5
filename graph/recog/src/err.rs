use lexint_trees::err::IntervalError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecogError {
    #[error(transparent)]
    Interval(#[from] IntervalError),
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(String),
    #[error("vertex {0} occurs twice in the ordering")]
    DuplicateVertex(String),
    #[error("priority ordering misses {missing} of the graph's {expected} vertices")]
    IncompletePriority { missing: usize, expected: usize },
    #[error("graph has {found} {what}, over the configured limit of {limit}")]
    TooLarge { what: &'static str, found: usize, limit: usize },
    #[error("the graph is not an interval graph")]
    NotInterval,
    #[error("interval model disagrees with the graph around vertex {0}")]
    ModelMismatch(String),
}

pub type Result<T> = std::result::Result<T, RecogError>;

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot print configuration: {0}")]
    Print(#[from] toml::ser::Error),
}
