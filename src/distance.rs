use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{ApspError, Result};
use crate::weight::{Overflow, Weight};

/// Shortest-path distance between an ordered pair of vertices.
///
/// Ordered `UnboundedBelow < Finite(_) < NoPath`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Distance<W> {
    Finite(W),
    /// Destination is unreachable from the source.
    NoPath,
    /// A negative cycle lies on some walk between the pair.
    UnboundedBelow,
}

impl<W: Weight> Distance<W> {
    #[inline]
    pub fn finite(self) -> Option<W> {
        match self {
            Distance::Finite(w) => Some(w),
            _ => None,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Reachable at all, bounded or not.
    #[inline]
    pub fn is_reachable(self) -> bool {
        !matches!(self, Distance::NoPath)
    }

    /// Weight of the walk formed by following `self` and then `rhs`.
    ///
    /// Falling off the bottom of the weight type yields `UnboundedBelow`;
    /// rising off the top is an error.
    #[inline]
    pub fn through(self, rhs: Self) -> Result<Self> {
        match (self, rhs) {
            (Distance::NoPath, _) | (_, Distance::NoPath) => Ok(Distance::NoPath),
            (Distance::UnboundedBelow, _) | (_, Distance::UnboundedBelow) => Ok(Distance::UnboundedBelow),
            (Distance::Finite(a), Distance::Finite(b)) => match a.add_checked(b) {
                Ok(sum) => Ok(Distance::Finite(sum)),
                Err(Overflow::Below) => Ok(Distance::UnboundedBelow),
                Err(Overflow::Above) => Err(ApspError::WeightOverflow),
            },
        }
    }

    #[inline]
    fn rank(self) -> u8 {
        match self {
            Distance::UnboundedBelow => 0,
            Distance::Finite(_) => 1,
            Distance::NoPath => 2,
        }
    }

    /// Strict improvement test used by every relaxation.
    #[inline]
    pub fn is_shorter_than(self, other: Self) -> bool {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a < b,
            _ => self.rank() < other.rank(),
        }
    }
}

impl<W: Weight> PartialOrd for Distance<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.partial_cmp(b),
            _ => Some(self.rank().cmp(&other.rank())),
        }
    }
}

impl<W: Weight> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{}", w),
            Distance::NoPath => f.write_str("inf"),
            Distance::UnboundedBelow => f.write_str("-inf"),
        }
    }
}
