//! Search windows for constrained DTW.

use std::collections::BTreeSet;

use crate::path::WarpingPath;

/// A set of `(i, j)` index pairs defining the allowed search region of a
/// constrained alignment.
///
/// Backed by a `BTreeSet`, so iteration is lexicographic in `(i, j)`. That
/// ordering guarantees the predecessors `(i-1, j)`, `(i, j-1)`, `(i-1, j-1)`
/// of any in-window cell are filled before the cell itself — a correctness
/// requirement of the sparse table fill, not an optimization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentWindow(BTreeSet<(usize, usize)>);

impl AlignmentWindow {
    /// Build a Sakoe-Chiba band of the given width over an `len_x x len_y`
    /// table: row `i` spans columns `max(0, i - width)` to
    /// `min(len_y, i + width + 1)` exclusive.
    #[must_use]
    pub fn sakoe_chiba(len_x: usize, len_y: usize, width: usize) -> Self {
        let mut cells = BTreeSet::new();
        for i in 0..len_x {
            let lo = i.saturating_sub(width);
            let hi = (i + width + 1).min(len_y);
            for j in lo..hi {
                cells.insert((i, j));
            }
        }
        Self(cells)
    }

    /// Project a coarse-resolution warping path into a full-resolution window.
    ///
    /// Every coarse pair `(i, j)` on the path is expanded to the cells
    /// `(2i + a, 2j + b)` for offsets `(a, b)` in `[-radius, radius]^2`.
    /// Projected cells outside `len_x x len_y` are dropped, not clamped.
    #[must_use]
    pub fn from_coarse_path(
        path: &WarpingPath,
        len_x: usize,
        len_y: usize,
        radius: usize,
    ) -> Self {
        let r = radius as i64;
        let mut cells = BTreeSet::new();
        for step in path {
            for a in -r..=r {
                for b in -r..=r {
                    let i = 2 * step.x as i64 + a;
                    let j = 2 * step.y as i64 + b;
                    if i >= 0 && (i as usize) < len_x && j >= 0 && (j as usize) < len_y {
                        cells.insert((i as usize, j as usize));
                    }
                }
            }
        }
        Self(cells)
    }

    /// Return true if the window contains the cell `(i, j)`.
    #[must_use]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.0.contains(&(i, j))
    }

    /// Return true if the window contains the terminal cell
    /// `(len_x - 1, len_y - 1)`. An alignment over a window without its
    /// terminal cell is undefined.
    #[must_use]
    pub fn covers_terminal(&self, len_x: usize, len_y: usize) -> bool {
        len_x > 0 && len_y > 0 && self.contains(len_x - 1, len_y - 1)
    }

    /// Iterate the window cells in lexicographic `(i, j)` order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied()
    }

    /// Return the number of cells in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the window contains no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::WarpingStep;

    fn path(steps: &[(usize, usize)]) -> WarpingPath {
        WarpingPath::new(steps.iter().map(|&(x, y)| WarpingStep { x, y }).collect())
    }

    #[test]
    fn band_width_zero_is_diagonal() {
        let w = AlignmentWindow::sakoe_chiba(3, 3, 0);
        assert_eq!(w.len(), 3);
        assert!(w.contains(0, 0));
        assert!(w.contains(1, 1));
        assert!(w.contains(2, 2));
        assert!(!w.contains(0, 1));
    }

    #[test]
    fn band_full_width_covers_table() {
        let w = AlignmentWindow::sakoe_chiba(3, 4, 4);
        assert_eq!(w.len(), 12);
        assert!(w.covers_terminal(3, 4));
    }

    #[test]
    fn band_clips_to_bounds() {
        let w = AlignmentWindow::sakoe_chiba(4, 2, 1);
        // Row 3 spans columns 2..2 after clipping: empty.
        assert!(!w.contains(3, 2));
        assert!(w.contains(1, 0));
        assert!(w.contains(1, 1));
    }

    #[test]
    fn iteration_is_lexicographic() {
        let w = AlignmentWindow::sakoe_chiba(3, 3, 1);
        let cells: Vec<_> = w.iter().collect();
        let mut sorted = cells.clone();
        sorted.sort_unstable();
        assert_eq!(cells, sorted);
    }

    #[test]
    fn projection_doubles_indices() {
        let w = AlignmentWindow::from_coarse_path(&path(&[(1, 1)]), 10, 10, 1);
        // (2*1 + a, 2*1 + b) for a, b in [-1, 1]: a 3x3 block around (2, 2).
        assert_eq!(w.len(), 9);
        assert!(w.contains(1, 1));
        assert!(w.contains(3, 3));
        assert!(!w.contains(4, 2));
    }

    #[test]
    fn projection_drops_out_of_range_cells() {
        let w = AlignmentWindow::from_coarse_path(&path(&[(0, 0)]), 2, 2, 1);
        // Negative offsets fall outside the table and are dropped.
        assert_eq!(w.len(), 4);
        assert!(w.contains(0, 0));
        assert!(w.contains(1, 1));
    }

    #[test]
    fn terminal_coverage_check() {
        let w = AlignmentWindow::sakoe_chiba(5, 5, 0);
        assert!(w.covers_terminal(5, 5));
        assert!(!w.covers_terminal(5, 4));
    }
}
