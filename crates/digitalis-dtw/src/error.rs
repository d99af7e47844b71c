//! Error types for DTW computation and series validation.

/// Errors from DTW distance computation and beat series validation.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a beat series.
    #[error("beat series must be non-empty")]
    EmptySeries,

    /// Returned when a series contains NaN, infinity, or negative infinity.
    #[error("beat series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when a point series is built from points of unequal dimension.
    #[error("point {index} has dimension {got}, expected {expected}")]
    RaggedPoints {
        /// Index of the offending point.
        index: usize,
        /// Dimension of the first point.
        expected: usize,
        /// Dimension of the offending point.
        got: usize,
    },

    /// Returned when two series of different point dimension are aligned.
    #[error("cannot align point series of dimension {left} with dimension {right}")]
    DimensionMismatch {
        /// Dimension of the first series.
        left: usize,
        /// Dimension of the second series.
        right: usize,
    },

    /// Returned when a constrained window does not contain the terminal cell.
    #[error("alignment window excludes the terminal cell ({n}, {m})")]
    WindowExcludesTerminal {
        /// Last row index of the cost table (len of first series minus one).
        n: usize,
        /// Last column index of the cost table (len of second series minus one).
        m: usize,
    },

    /// Returned when the window contains the terminal cell but no contiguous
    /// path through the window reaches it.
    #[error("no alignment path reaches the terminal cell ({n}, {m}) inside the window")]
    TerminalUnreachable {
        /// Last row index of the cost table.
        n: usize,
        /// Last column index of the cost table.
        m: usize,
    },
}
