//! 2D periodic grid topology (torus) with 4-connected neighbourhood.

use crate::error::GridError;

/// A two-dimensional grid with periodic wraparound on both axes.
///
/// Each cell has coordinate `(row, col)` where `0 <= row < rows` and
/// `0 <= col < cols`. Rows are axis 0 (`nx`) and columns are axis 1 (`ny`).
/// Cells are stored row-major, so `(row, col)` lives at flat index
/// `row * cols + col`.
///
/// Every cell has exactly four neighbours (north, south, west, east). On an
/// axis of length 1 both neighbours along that axis are the cell itself.
///
/// # Examples
///
/// ```
/// use switchfield_core::Grid;
///
/// let grid = Grid::new(4, 6, 1.0).unwrap();
/// assert_eq!(grid.cell_count(), 24);
/// // Corner (0, 0) wraps to the last row and last column.
/// assert_eq!(grid.neighbours(0, 0), [18, 6, 5, 1]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    dx: f64,
}

impl Grid {
    /// Maximum dimension size: wrapped offsets are computed in `i64` and
    /// indices must fit in `i32` for interop with signed coordinates.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a new `rows x cols` periodic grid with uniform spacing `dx`.
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is 0,
    /// [`GridError::DimensionTooLarge`] if either exceeds [`Self::MAX_DIM`],
    /// or [`GridError::InvalidSpacing`] if `dx` is not finite and positive.
    pub fn new(rows: u32, cols: u32, dx: f64) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        if rows > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "rows",
                value: rows,
                max: Self::MAX_DIM,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: Self::MAX_DIM,
            });
        }
        if !(dx.is_finite() && dx > 0.0) {
            return Err(GridError::InvalidSpacing { dx });
        }
        Ok(Self { rows, cols, dx })
    }

    /// Number of rows (`nx`).
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns (`ny`).
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Uniform spatial step.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Always returns `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flat row-major index of `(row, col)`. Does not wrap.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols as usize + col
    }

    /// Wrap a signed row offset onto `[0, rows)`.
    #[inline]
    pub fn wrap_row(&self, row: i64) -> usize {
        wrap_axis(row, self.rows)
    }

    /// Wrap a signed column offset onto `[0, cols)`.
    #[inline]
    pub fn wrap_col(&self, col: i64) -> usize {
        wrap_axis(col, self.cols)
    }

    /// Flat indices of the four periodic neighbours of `(row, col)`, in the
    /// order north, south, west, east.
    pub fn neighbours(&self, row: usize, col: usize) -> [usize; 4] {
        let r = row as i64;
        let c = col as i64;
        [
            self.index(self.wrap_row(r - 1), col),
            self.index(self.wrap_row(r + 1), col),
            self.index(row, self.wrap_col(c - 1)),
            self.index(row, self.wrap_col(c + 1)),
        ]
    }
}

#[inline]
fn wrap_axis(val: i64, len: u32) -> usize {
    val.rem_euclid(len as i64) as usize
}
