//! Dynamic time warping distances for fixed-length beat waveforms.
//!
//! Pure math library — zero I/O. Provides exact DTW on scalar series,
//! Sakoe-Chiba banded DTW on (possibly multivariate) point series, an
//! explicitly window-constrained solver with warping path recovery, and a
//! recursive multiresolution approximation (FastDTW) built on top of it.

mod banded;
mod constrained;
mod cost;
mod error;
mod exact;
mod multires;
mod path;
mod series;
mod window;

pub use banded::banded_distance;
pub use constrained::constrained_distance;
pub use cost::AlignmentCost;
pub use error::DtwError;
pub use exact::exact_distance;
pub use multires::{FastDtw, DEFAULT_RADIUS};
pub use path::{WarpingPath, WarpingStep};
pub use series::{BeatSeries, BeatSeriesView, PointSeries};
pub use window::AlignmentWindow;
