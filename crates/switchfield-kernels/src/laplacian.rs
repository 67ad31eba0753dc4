//! Discrete Laplacian with periodic boundary conditions.
//!
//! 4-neighbour (von Neumann) stencil:
//!
//! ```text
//! lap[i,j] = (Z[i-1,j] + Z[i+1,j] + Z[i,j-1] + Z[i,j+1] - 4*Z[i,j]) / dx^2
//! ```
//!
//! with row indices taken modulo `rows` and column indices modulo `cols`.
//! Because every neighbour contribution appears once with each sign, the
//! Laplacian of any field sums to zero over the torus.

use switchfield_core::{Field, Grid};

/// Laplacian of `field`, returned as a new field shaped like `grid`.
///
/// # Panics
///
/// Panics if `field` is not shaped like `grid`. Callers that accept
/// user-supplied fields validate shapes at construction time.
pub fn laplacian(field: &Field, grid: &Grid) -> Field {
    let mut out = Field::zeros(grid);
    laplacian_into(field, grid, out.as_mut_slice());
    out
}

/// Write the Laplacian of `field` into `out` (row-major, `grid.cell_count()`
/// long). Every element of `out` is overwritten.
///
/// # Panics
///
/// Panics if `field` or `out` do not hold `grid.cell_count()` values.
pub fn laplacian_into(field: &Field, grid: &Grid, out: &mut [f64]) {
    let z = field.as_slice();
    let n = grid.cell_count();
    assert_eq!(z.len(), n, "field length does not match grid");
    assert_eq!(out.len(), n, "output length does not match grid");

    let rows = grid.rows() as usize;
    let cols = grid.cols() as usize;
    let dx2 = grid.dx() * grid.dx();

    for r in 0..rows {
        let north = grid.wrap_row(r as i64 - 1) * cols;
        let south = grid.wrap_row(r as i64 + 1) * cols;
        let here = r * cols;
        for c in 0..cols {
            let west = grid.wrap_col(c as i64 - 1);
            let east = grid.wrap_col(c as i64 + 1);
            let centre = z[here + c];
            let sum = z[north + c] + z[south + c] + z[here + west] + z[here + east]
                - 4.0 * centre;
            // must match laplacian_at bit for bit
            out[here + c] = sum / dx2;
        }
    }
}

/// Laplacian at a single cell.
pub fn laplacian_at(field: &Field, grid: &Grid, row: usize, col: usize) -> f64 {
    let z = field.as_slice();
    let [north, south, west, east] = grid.neighbours(row, col);
    let centre = z[grid.index(row, col)];
    (z[north] + z[south] + z[west] + z[east] - 4.0 * centre) / (grid.dx() * grid.dx())
}
