//! Multiresolution DTW approximation (FastDTW).

use tracing::instrument;

use crate::banded;
use crate::constrained;
use crate::cost::AlignmentCost;
use crate::error::DtwError;
use crate::path::WarpingPath;
use crate::series::PointSeries;
use crate::window::AlignmentWindow;

/// Default search radius, matching the reference classification pipeline.
pub const DEFAULT_RADIUS: usize = 2;

/// Recursive multiresolution DTW approximator.
///
/// Halves both series by pairwise averaging until they drop below
/// `radius + 2` points, solves the coarsest level with a banded alignment,
/// then repeatedly projects the coarse warping path into a radius-expanded
/// window at the next finer resolution and re-solves inside that window.
/// Each recursion level returns both its cost and its warping path; the
/// path is consumed by the level above to build its search window.
///
/// Cheaper than exact DTW for long series while staying close to the exact
/// value; never below it, since every level searches a subset of the full
/// table. Larger radii widen the window and converge on the exact distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastDtw {
    radius: usize,
}

impl Default for FastDtw {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

impl FastDtw {
    /// Create an approximator with the given search radius.
    ///
    /// A radius of at least 1 guarantees the projected window covers the
    /// terminal cell at every level; radius 0 can leave the terminal
    /// uncovered for even-length series, surfacing as
    /// [`DtwError::WindowExcludesTerminal`].
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    /// Return the configured search radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Compute the approximate DTW distance between two point series.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::DimensionMismatch`] | `x` and `y` have different point dimensions |
    /// | [`DtwError::WindowExcludesTerminal`] | Radius 0 left a level's terminal uncovered |
    #[instrument(skip(x, y), fields(n = x.len(), m = y.len(), radius = self.radius))]
    pub fn distance(&self, x: &PointSeries, y: &PointSeries) -> Result<AlignmentCost, DtwError> {
        self.align(x, y).map(|(cost, _)| cost)
    }

    /// Compute the approximate distance and the full-resolution warping path.
    ///
    /// # Errors
    ///
    /// Same conditions as [`distance`][Self::distance].
    pub fn distance_with_path(
        &self,
        x: &PointSeries,
        y: &PointSeries,
    ) -> Result<(AlignmentCost, WarpingPath), DtwError> {
        self.align(x, y)
    }

    fn align(
        &self,
        x: &PointSeries,
        y: &PointSeries,
    ) -> Result<(AlignmentCost, WarpingPath), DtwError> {
        let min_size = self.radius + 2;
        if x.len() < min_size || y.len() < min_size {
            return banded::banded_with_path(x, y, Some(self.radius));
        }

        let x_coarse = x.halved();
        let y_coarse = y.halved();

        // The coarse cost is discarded; the coarse path is what this level
        // consumes to build its window.
        let (_, coarse_path) = self.align(&x_coarse, &y_coarse)?;

        let window = AlignmentWindow::from_coarse_path(&coarse_path, x.len(), y.len(), self.radius);
        constrained::constrained_distance(x, y, &window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banded::banded_distance;

    fn scalar(values: &[f64]) -> PointSeries {
        PointSeries::new(values.iter().map(|&v| vec![v]).collect()).unwrap()
    }

    fn sine(n: usize, offset: f64) -> PointSeries {
        scalar(
            &(0..n)
                .map(|i| (i as f64 * 0.1).sin() + offset)
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn short_series_fall_back_to_banded() {
        // Both series shorter than radius + 2: identical to a width-2 band.
        let x = scalar(&[1.0, 2.0, 3.0]);
        let y = scalar(&[1.0, 2.0, 4.0]);
        let fast = FastDtw::new(2).distance(&x, &y).unwrap();
        let band = banded_distance(&x, &y, Some(2)).unwrap();
        assert!((fast.value() - band.value()).abs() < 1e-10);
    }

    #[test]
    fn identical_series_zero() {
        let x = sine(64, 0.0);
        let d = FastDtw::default().distance(&x, &x).unwrap();
        assert!((d.value() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn approximation_never_below_exact() {
        let x = sine(64, 0.0);
        let y = sine(64, 0.5);
        let exact = banded_distance(&x, &y, None).unwrap();
        let fast = FastDtw::new(1).distance(&x, &y).unwrap();
        assert!(fast.value() >= exact.value() - 1e-10);
    }

    #[test]
    fn approximation_close_on_smooth_series() {
        let x = sine(100, 0.0);
        let y = sine(100, 0.4);
        let exact = banded_distance(&x, &y, None).unwrap();
        let fast = FastDtw::new(2).distance(&x, &y).unwrap();
        let rel = (fast.value() - exact.value()) / exact.value();
        assert!(rel < 0.25, "relative error {rel} too large");
    }

    #[test]
    fn large_radius_matches_exact() {
        // Radius >= length forces the banded base case over the full table.
        let x = sine(40, 0.0);
        let y = sine(40, 0.7);
        let exact = banded_distance(&x, &y, None).unwrap();
        let fast = FastDtw::new(40).distance(&x, &y).unwrap();
        assert!((fast.value() - exact.value()).abs() < 1e-10);
    }

    #[test]
    fn path_spans_both_series() {
        let x = sine(32, 0.0);
        let y = sine(32, 0.3);
        let (_, path) = FastDtw::default().distance_with_path(&x, &y).unwrap();
        let first = path.steps().first().unwrap();
        let last = path.steps().last().unwrap();
        assert_eq!((first.x, first.y), (0, 0));
        assert_eq!((last.x, last.y), (31, 31));
    }

    #[test]
    fn default_radius_is_two() {
        assert_eq!(FastDtw::default().radius(), DEFAULT_RADIUS);
    }
}
