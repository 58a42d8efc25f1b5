//! Arenas addressed by typed handles.
//!
//! Linked structures in this workspace (rings, tree nodes, partition cells) never own
//! each other through pointers; they store handles into an arena instead. Handle types
//! are declared with [`new_key_type!`].

use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

pub use crate::new_key_type;

/* --------------------------------- Handles -------------------------------- */

/// A typed slot number.
pub trait Handle: Copy + Eq + std::hash::Hash {
    fn from_index(idx: usize) -> Self;
    fn index(&self) -> usize;
}

#[macro_export]
macro_rules! new_key_type {
    ( $(#[$outer:meta])* $vis:vis struct $name:ident ; $($rest:tt)* ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
        $vis struct $name(usize);

        impl $crate::arena::Handle for $name {
            fn from_index(idx: usize) -> Self {
                Self(idx)
            }
            fn index(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }

        $crate::new_key_type!($($rest)*);
    };

    () => {}
}

/* ------------------------------- ArenaDense ------------------------------- */

/// Append-only arena; handles stay valid for the arena's lifetime.
#[derive(Debug, Clone)]
pub struct ArenaDense<Id, T> {
    vec: Vec<T>,
    _marker: PhantomData<Id>,
}

impl<Id, T> Default for ArenaDense<Id, T> {
    fn default() -> Self {
        ArenaDense { vec: Vec::new(), _marker: PhantomData }
    }
}

impl<Id: Handle, T> ArenaDense<Id, T> {
    pub fn alloc(&mut self, val: T) -> Id {
        self.vec.push(val);
        Id::from_index(self.vec.len() - 1)
    }
    pub fn get(&self, id: &Id) -> Option<&T> {
        self.vec.get(id.index())
    }
    pub fn get_mut(&mut self, id: &Id) -> Option<&mut T> {
        self.vec.get_mut(id.index())
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> + '_ {
        self.vec.iter().enumerate().map(|(idx, val)| (Id::from_index(idx), val))
    }
}

impl<Id: Handle, T> Index<&Id> for ArenaDense<Id, T> {
    type Output = T;
    fn index(&self, id: &Id) -> &T {
        &self.vec[id.index()]
    }
}

impl<Id: Handle, T> IndexMut<&Id> for ArenaDense<Id, T> {
    fn index_mut(&mut self, id: &Id) -> &mut T {
        &mut self.vec[id.index()]
    }
}

/* -------------------------------- ArenaSlab ------------------------------- */

/// Arena whose slots can be released and recycled.
///
/// Indexing with a released handle panics; `get` returns `None`. A recycled slot hands
/// out the same handle again, so holders of a released handle must drop it.
#[derive(Debug, Clone)]
pub struct ArenaSlab<Id, T> {
    slots: Vec<Option<T>>,
    freed: Vec<usize>,
    _marker: PhantomData<Id>,
}

impl<Id, T> Default for ArenaSlab<Id, T> {
    fn default() -> Self {
        ArenaSlab { slots: Vec::new(), freed: Vec::new(), _marker: PhantomData }
    }
}

impl<Id: Handle, T> ArenaSlab<Id, T> {
    pub fn alloc(&mut self, val: T) -> Id {
        match self.freed.pop() {
            | Some(idx) => {
                self.slots[idx] = Some(val);
                Id::from_index(idx)
            }
            | None => {
                self.slots.push(Some(val));
                Id::from_index(self.slots.len() - 1)
            }
        }
    }
    /// Release a slot; `None` if the handle was already released.
    pub fn remove(&mut self, id: &Id) -> Option<T> {
        let val = self.slots.get_mut(id.index())?.take()?;
        self.freed.push(id.index());
        Some(val)
    }
    pub fn get(&self, id: &Id) -> Option<&T> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }
    pub fn get_mut(&mut self, id: &Id) -> Option<&mut T> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }
    pub fn contains(&self, id: &Id) -> bool {
        self.get(id).is_some()
    }
    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.slots.len() - self.freed.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|val| (Id::from_index(idx), val)))
    }
}

impl<Id: Handle, T> Index<&Id> for ArenaSlab<Id, T> {
    type Output = T;
    fn index(&self, id: &Id) -> &T {
        let Some(val) = self.get(id) else { panic!("stale arena handle #{}", id.index()) };
        val
    }
}

impl<Id: Handle, T> IndexMut<&Id> for ArenaSlab<Id, T> {
    fn index_mut(&mut self, id: &Id) -> &mut T {
        let idx = id.index();
        let Some(val) = self.get_mut(id) else { panic!("stale arena handle #{}", idx) };
        val
    }
}
