//! Sakoe-Chiba banded DTW.

use tracing::instrument;

use crate::constrained;
use crate::cost::AlignmentCost;
use crate::error::DtwError;
use crate::path::WarpingPath;
use crate::series::PointSeries;
use crate::window::AlignmentWindow;

/// Resolve the effective band width.
///
/// Defaults to `max(len_x, len_y)` (unconstrained) and is always widened to
/// at least `|len_x - len_y|`, so a valid path to the terminal cell exists.
fn effective_width(len_x: usize, len_y: usize, width: Option<usize>) -> usize {
    width
        .unwrap_or_else(|| len_x.max(len_y))
        .max(len_x.abs_diff(len_y))
}

/// Compute the DTW distance between two point series under a Sakoe-Chiba
/// band of the given width.
///
/// With `width` of `None` the band spans the full table and this reduces to
/// exact DTW. Cells outside the band are never computed and read as
/// infinity.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::DimensionMismatch`] | `x` and `y` have different point dimensions |
#[instrument(skip(x, y), fields(n = x.len(), m = y.len()))]
pub fn banded_distance(
    x: &PointSeries,
    y: &PointSeries,
    width: Option<usize>,
) -> Result<AlignmentCost, DtwError> {
    banded_with_path(x, y, width).map(|(cost, _)| cost)
}

/// Banded DTW returning the warping path as well. Base case of the
/// multiresolution recursion.
pub(crate) fn banded_with_path(
    x: &PointSeries,
    y: &PointSeries,
    width: Option<usize>,
) -> Result<(AlignmentCost, WarpingPath), DtwError> {
    let w = effective_width(x.len(), y.len(), width);
    let window = AlignmentWindow::sakoe_chiba(x.len(), y.len(), w);
    constrained::constrained_distance(x, y, &window)
}
