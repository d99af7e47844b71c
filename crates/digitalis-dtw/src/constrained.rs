//! Window-constrained DTW over a sparse cost table.
//!
//! The single constrained solver in this crate: the Sakoe-Chiba banded
//! variant and every level of the multiresolution approximation both run
//! through [`constrained_distance`].

use std::collections::HashMap;

use tracing::instrument;

use crate::cost::AlignmentCost;
use crate::error::DtwError;
use crate::path::{WarpingPath, WarpingStep};
use crate::series::{squared_euclidean, PointSeries};
use crate::window::AlignmentWindow;

/// Accumulated cost at `(i, j)`, with boundary indices at `-1`. Missing
/// cells read as infinity — resolving them to a default of zero would
/// silently corrupt the predecessor minimum.
fn lookup(table: &HashMap<(i64, i64), f64>, i: i64, j: i64) -> f64 {
    table.get(&(i, j)).copied().unwrap_or(f64::INFINITY)
}

/// Compute the DTW distance between two point series restricted to an
/// explicit search window, returning the cost and the optimal warping path.
///
/// Fills a sparse accumulated-cost table keyed by index pair, seeded with
/// `(-1, -1) = 0`, visiting window cells in lexicographic order so every
/// predecessor is resolved before its successor. The distance is the square
/// root of the accumulated cost at the terminal cell; the path is recovered
/// by walking minimum predecessors back from the terminal.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::DimensionMismatch`] | `x` and `y` have different point dimensions |
/// | [`DtwError::WindowExcludesTerminal`] | `window` lacks `(len x - 1, len y - 1)` |
/// | [`DtwError::TerminalUnreachable`] | No contiguous in-window path reaches the terminal |
#[instrument(skip(x, y, window), fields(n = x.len(), m = y.len(), cells = window.len()))]
pub fn constrained_distance(
    x: &PointSeries,
    y: &PointSeries,
    window: &AlignmentWindow,
) -> Result<(AlignmentCost, WarpingPath), DtwError> {
    if x.dim() != y.dim() {
        return Err(DtwError::DimensionMismatch {
            left: x.dim(),
            right: y.dim(),
        });
    }
    let n = x.len();
    let m = y.len();
    if !window.covers_terminal(n, m) {
        return Err(DtwError::WindowExcludesTerminal { n: n - 1, m: m - 1 });
    }

    let mut table: HashMap<(i64, i64), f64> = HashMap::with_capacity(window.len() + 1);
    table.insert((-1, -1), 0.0);

    for (i, j) in window.iter() {
        let cost = squared_euclidean(x.point(i), y.point(j));
        let ii = i as i64;
        let jj = j as i64;
        let best = lookup(&table, ii - 1, jj)
            .min(lookup(&table, ii, jj - 1))
            .min(lookup(&table, ii - 1, jj - 1));
        table.insert((ii, jj), cost + best);
    }

    let total = lookup(&table, n as i64 - 1, m as i64 - 1);
    if !total.is_finite() {
        return Err(DtwError::TerminalUnreachable { n: n - 1, m: m - 1 });
    }

    Ok((AlignmentCost::new(total.sqrt()), traceback(&table, n, m)))
}

/// Walk minimum predecessors from the terminal cell back to `(0, 0)`.
///
/// Every finite cell other than the origin has at least one finite
/// predecessor, so the walk always terminates. Ties prefer the diagonal.
fn traceback(table: &HashMap<(i64, i64), f64>, n: usize, m: usize) -> WarpingPath {
    let mut steps = Vec::new();
    let mut i = n - 1;
    let mut j = m - 1;

    loop {
        steps.push(WarpingStep { x: i, y: j });
        if i == 0 && j == 0 {
            break;
        }
        let ii = i as i64;
        let jj = j as i64;
        let up = lookup(table, ii - 1, jj);
        let left = lookup(table, ii, jj - 1);
        let diag = lookup(table, ii - 1, jj - 1);

        if diag <= up && diag <= left {
            i -= 1;
            j -= 1;
        } else if up <= left {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    steps.reverse();
    WarpingPath::new(steps)
}
