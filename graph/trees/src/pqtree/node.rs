use derive_more::From;
use indexmap::IndexSet;
use lexint_utils::ring::RingId;
use std::fmt;

lexint_utils::new_key_type! {
    pub struct PQId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Leaf,
    P,
    Q,
    Section,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Kind::Leaf => write!(f, "leaf"),
            | Kind::P => write!(f, "P"),
            | Kind::Q => write!(f, "Q"),
            | Kind::Section => write!(f, "Q-section"),
        }
    }
}

/// One end of a Q-node's section chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum End {
    Left,
    Right,
}

/// A terminal holding a single vertex or a group of vertices.
#[derive(Clone, Debug, Default)]
pub struct Leaf;

/// Unordered node; its children sit on a ring, one of them marked current.
#[derive(Clone, Debug, Default)]
pub struct PNode {
    pub(super) current: Option<RingId>,
    pub(super) len: usize,
}

/// Ordered node; its children hang off a chain of sections.
#[derive(Clone, Debug, Default)]
pub struct QNode {
    pub(super) leftmost: Option<PQId>,
    pub(super) rightmost: Option<PQId>,
}

/// Link of a Q-node's chain carrying exactly one child.
#[derive(Clone, Debug)]
pub struct QSection {
    pub(super) child: PQId,
    pub(super) left: Option<PQId>,
    pub(super) right: Option<PQId>,
}

#[derive(Clone, Debug, From)]
pub enum Shape {
    Leaf(Leaf),
    P(PNode),
    Q(QNode),
    Section(QSection),
}

impl Shape {
    pub fn kind(&self) -> Kind {
        match self {
            | Shape::Leaf(_) => Kind::Leaf,
            | Shape::P(_) => Kind::P,
            | Shape::Q(_) => Kind::Q,
            | Shape::Section(_) => Kind::Section,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PQNode<T> {
    pub(super) parent: Option<PQId>,
    /// position on the parent's ring when the parent is a P-node
    pub(super) slot: Option<RingId>,
    /// candidates accumulated during a refinement
    pub(super) set_a: IndexSet<T>,
    /// vertices of the subtree
    pub(super) set_b: IndexSet<T>,
    pub(super) shape: Shape,
}

impl<T> PQNode<T> {
    pub(super) fn new(shape: impl Into<Shape>, set_b: IndexSet<T>) -> Self {
        PQNode { parent: None, slot: None, set_a: IndexSet::new(), set_b, shape: shape.into() }
    }
}
