//! Alignment cost newtype wrapper.

use std::cmp::Ordering;
use std::fmt;

/// A non-negative accumulated alignment cost.
///
/// Zero iff the two aligned sequences are identical under the local metric.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AlignmentCost(f64);

impl AlignmentCost {
    pub(crate) fn new(value: f64) -> Self {
        debug_assert!(!value.is_nan(), "alignment cost must not be NaN");
        Self(value)
    }

    /// Return the raw cost value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for AlignmentCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
