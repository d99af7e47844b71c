//! Exact DTW on scalar beat series.

use tracing::instrument;

use crate::cost::AlignmentCost;
use crate::series::BeatSeriesView;

/// Compute the exact DTW distance between two scalar beat series.
///
/// Builds the dense `(n+1) x (m+1)` accumulated-cost table initialized to
/// infinity with the origin cell at zero. Local cost is the squared sample
/// difference; each cell adds the minimum of its up, left, and diagonal
/// predecessors. The distance is the square root of the corner cell.
///
/// Zero iff the series are identical; symmetric in its arguments.
/// O(n * m) time and space — the motivation for the banded and
/// multiresolution variants.
#[must_use]
#[instrument(skip(s, t), fields(n = s.len(), m = t.len()))]
pub fn exact_distance(s: BeatSeriesView<'_>, t: BeatSeriesView<'_>) -> AlignmentCost {
    let n = s.len();
    let m = t.len();
    let width = m + 1;

    let mut table = vec![f64::INFINITY; (n + 1) * width];
    table[0] = 0.0;

    for i in 1..=n {
        for j in 1..=m {
            let d = s[i - 1] - t[j - 1];
            let cost = d * d;
            let up = table[(i - 1) * width + j];
            let left = table[i * width + j - 1];
            let diag = table[(i - 1) * width + j - 1];
            table[i * width + j] = cost + up.min(left).min(diag);
        }
    }

    AlignmentCost::new(table[n * width + m].sqrt())
}
