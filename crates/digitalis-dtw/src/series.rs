//! Beat series types with validation guarantees.

use std::ops::Index;

use crate::error::DtwError;

/// Owned, validated scalar beat waveform. Guaranteed non-empty with all
/// finite samples. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatSeries(Vec<f64>);

impl BeatSeries {
    /// Create a new beat series, validating that it is non-empty and all
    /// samples are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `samples` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any sample is NaN or infinite |
    pub fn new(samples: Vec<f64>) -> Result<Self, DtwError> {
        if samples.is_empty() {
            return Err(DtwError::EmptySeries);
        }
        if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
            return Err(DtwError::NonFiniteValue { index });
        }
        Ok(Self(samples))
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> BeatSeriesView<'_> {
        BeatSeriesView(&self.0)
    }

    /// Reshape this scalar series into column-vector form (dimension-1
    /// points) for multivariate alignment.
    #[must_use]
    pub fn to_points(&self) -> PointSeries {
        PointSeries {
            data: self.0.clone(),
            dim: 1,
        }
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the series has no samples. Always `false` for a series
    /// constructed via [`BeatSeries::new`]; provided to satisfy the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[f64]> for BeatSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for BeatSeries {
    type Error = DtwError;

    fn try_from(samples: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

/// Borrowed, validated view into a scalar beat series.
#[derive(Debug, Clone, Copy)]
pub struct BeatSeriesView<'a>(&'a [f64]);

impl<'a> BeatSeriesView<'a> {
    /// Create a new view, validating that the slice is non-empty and all
    /// samples are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `slice` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any sample is NaN or infinite |
    pub fn new(slice: &'a [f64]) -> Result<Self, DtwError> {
        if slice.is_empty() {
            return Err(DtwError::EmptySeries);
        }
        if let Some(index) = slice.iter().position(|v| !v.is_finite()) {
            return Err(DtwError::NonFiniteValue { index });
        }
        Ok(Self(slice))
    }

    /// Return the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.0
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the view has no samples. Always `false` for views
    /// constructed via [`BeatSeriesView::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for BeatSeriesView<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Owned, validated sequence of fixed-dimension points, stored flat.
///
/// Used by the banded and multiresolution aligners, which operate on
/// possibly multivariate points. `point(i)` is the `i`-th point as a
/// `dim`-length slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    data: Vec<f64>,
    dim: usize,
}

impl PointSeries {
    /// Create a point series from a list of points, validating that the list
    /// is non-empty, every point has the same non-zero dimension, and every
    /// coordinate is finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `points` is empty, or the first point is |
    /// | [`DtwError::RaggedPoints`] | A point's dimension differs from the first |
    /// | [`DtwError::NonFiniteValue`] | Any coordinate is NaN or infinite |
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self, DtwError> {
        let first = points.first().ok_or(DtwError::EmptySeries)?;
        let dim = first.len();
        if dim == 0 {
            return Err(DtwError::EmptySeries);
        }

        let mut data = Vec::with_capacity(points.len() * dim);
        for (index, point) in points.iter().enumerate() {
            if point.len() != dim {
                return Err(DtwError::RaggedPoints {
                    index,
                    expected: dim,
                    got: point.len(),
                });
            }
            data.extend_from_slice(point);
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(DtwError::NonFiniteValue { index: index / dim });
        }
        Ok(Self { data, dim })
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Return true if the series has no points. Always `false` for a series
    /// constructed via [`PointSeries::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the dimension of each point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the `i`-th point as a slice of length [`dim`][Self::dim].
    #[must_use]
    pub fn point(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Halve the resolution by averaging consecutive point pairs
    /// coordinate-wise. A series of length `L` becomes length `ceil(L / 2)`;
    /// an odd trailing point is kept as-is.
    pub(crate) fn halved(&self) -> Self {
        let n = self.len();
        let mut data = Vec::with_capacity(n.div_ceil(2) * self.dim);
        let mut i = 0;
        while i < n {
            if i + 1 < n {
                let a = self.point(i);
                let b = self.point(i + 1);
                for d in 0..self.dim {
                    data.push((a[d] + b[d]) / 2.0);
                }
            } else {
                data.extend_from_slice(self.point(i));
            }
            i += 2;
        }
        Self {
            data,
            dim: self.dim,
        }
    }
}

/// Squared Euclidean distance between two equal-dimension points.
///
/// The single local-cost metric shared by every aligner in this crate.
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
