//! Dense scalar fields over a [`Grid`], and summary statistics.

use crate::error::FieldError;
use crate::grid::Grid;

/// A dense `rows x cols` array of `f64`, stored row-major.
///
/// Fields never change shape after construction. Concentrations (`C_a`,
/// `C_b`) and forcing masks (`A_mask`, `B_mask`) are both `Field`s; the
/// distinction is in who is allowed to mutate them.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    rows: u32,
    cols: u32,
    data: Vec<f64>,
}

impl Field {
    /// A field of zeros shaped like `grid`.
    pub fn zeros(grid: &Grid) -> Self {
        Self::filled(grid, 0.0)
    }

    /// A field with every cell set to `value`.
    pub fn filled(grid: &Grid, value: f64) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            data: vec![value; grid.cell_count()],
        }
    }

    /// Build a field by evaluating `f(row, col)` for every cell.
    pub fn from_fn(grid: &Grid, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let cols = grid.cols() as usize;
        let data = (0..grid.cell_count()).map(|i| f(i / cols, i % cols)).collect();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            data,
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Returns [`FieldError::LengthMismatch`] if `data.len()` is not
    /// `grid.cell_count()`.
    pub fn from_vec(grid: &Grid, data: Vec<f64>) -> Result<Self, FieldError> {
        if data.len() != grid.cell_count() {
            return Err(FieldError::LengthMismatch {
                expected: grid.cell_count(),
                actual: data.len(),
            });
        }
        Ok(Self {
            rows: grid.rows(),
            cols: grid.cols(),
            data,
        })
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always returns `false`: fields are shaped from non-empty grids.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`. Panics if out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols as usize + col]
    }

    /// Set the value at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols as usize + col] = value;
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of all cells.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Check that this field has the same shape as `grid`.
    ///
    /// `name` identifies the field in the returned error.
    pub fn check_shape(&self, name: &'static str, grid: &Grid) -> Result<(), FieldError> {
        if self.shape() != grid.shape() || self.data.len() != grid.cell_count() {
            return Err(FieldError::ShapeMismatch {
                name,
                expected: grid.shape(),
                actual: self.shape(),
            });
        }
        Ok(())
    }

    /// Elementwise `self - other`.
    pub fn difference(&self, other: &Field) -> Result<Field, FieldError> {
        if self.shape() != other.shape() {
            return Err(FieldError::ShapeMismatch {
                name: "rhs",
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(Field {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    /// Sum over all cells.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Index of the first NaN or infinite cell, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_finite())
    }

    /// Min, max, mean, and total over all cells.
    pub fn stats(&self) -> FieldStats {
        FieldStats::of(&self.data)
    }
}

/// Summary statistics for a field, as reported per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStats {
    /// Smallest cell value.
    pub min: f64,
    /// Largest cell value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sum over all cells ("mass").
    pub total: f64,
}

impl FieldStats {
    /// Compute statistics over a slice. An empty slice yields all zeros.
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                total: 0.0,
            };
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut total = 0.0;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            total += v;
        }
        Self {
            min,
            max,
            mean: total / values.len() as f64,
            total,
        }
    }
}
