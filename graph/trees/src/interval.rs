use crate::err::IntervalError;
use std::{fmt, ops::RangeInclusive};

/// A closed interval `[start, end]` with `start <= end`.
///
/// Intervals are ordered lexicographically by `(start, end)`; this is the key order of
/// [`IntervalTree`](crate::rbtree::IntervalTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T: Ord + Copy + fmt::Debug> Interval<T> {
    pub fn new(start: T, end: T) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::Malformed {
                start: format!("{:?}", start),
                end: format!("{:?}", end),
            });
        }
        Ok(Interval { start, end })
    }
}

impl<T: Ord + Copy> Interval<T> {
    /// The degenerate interval `[point, point]`.
    pub fn point(point: T) -> Self {
        Interval { start: point, end: point }
    }
    pub fn start(&self) -> T {
        self.start
    }
    pub fn end(&self) -> T {
        self.end
    }
    /// Closed intervals that merely touch at an endpoint overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
    pub fn contains(&self, point: T) -> bool {
        self.start <= point && point <= self.end
    }
}

impl<T: Ord + Copy + fmt::Debug> TryFrom<(T, T)> for Interval<T> {
    type Error = IntervalError;
    fn try_from((start, end): (T, T)) -> Result<Self, Self::Error> {
        Interval::new(start, end)
    }
}

impl<T: Ord + Copy + fmt::Debug> TryFrom<RangeInclusive<T>> for Interval<T> {
    type Error = IntervalError;
    fn try_from(range: RangeInclusive<T>) -> Result<Self, Self::Error> {
        Interval::new(*range.start(), *range.end())
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
