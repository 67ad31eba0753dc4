//! Reusable grids, fields, and assertions.
//!
//! - [`split_masks`]: the left/right half split used for initial
//!   concentrations and forcing masks.
//! - [`random_field`]: deterministic pseudo-random fields from a seed.
//! - [`assert_fields_close`]: cell-by-cell comparison with a tolerance.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use switchfield_core::{Field, Grid};

/// Build a grid, panicking on invalid dimensions.
pub fn grid(rows: u32, cols: u32, dx: f64) -> Grid {
    Grid::new(rows, cols, dx).expect("test grid dimensions must be valid")
}

/// A field with every cell set to `value`.
pub fn uniform(grid: &Grid, value: f64) -> Field {
    Field::filled(grid, value)
}

/// `(left, right)`: `left` is 1 on columns `[0, min(rows/2, cols))`,
/// `right` is 1 on the remaining columns.
pub fn split_masks(grid: &Grid) -> (Field, Field) {
    let half = (grid.rows() as usize / 2).min(grid.cols() as usize);
    let left = Field::from_fn(grid, |_, c| if c < half { 1.0 } else { 0.0 });
    let right = Field::from_fn(grid, |_, c| if c < half { 0.0 } else { 1.0 });
    (left, right)
}

/// Alternating `hi`/`lo` cells, `hi` at `(0, 0)`.
pub fn checkerboard(grid: &Grid, hi: f64, lo: f64) -> Field {
    Field::from_fn(grid, |r, c| if (r + c) % 2 == 0 { hi } else { lo })
}

/// Uniform samples in `[lo, hi)` from a ChaCha8 stream seeded with `seed`.
pub fn random_field(grid: &Grid, seed: u64, lo: f64, hi: f64) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Field::from_fn(grid, |_, _| lo + (hi - lo) * rng.random::<f64>())
}

/// Assert two fields have the same shape and every cell differs by at
/// most `tol`.
#[track_caller]
pub fn assert_fields_close(actual: &Field, expected: &Field, tol: f64) {
    assert_eq!(actual.shape(), expected.shape(), "field shapes differ");
    let cols = actual.cols() as usize;
    for (i, (&a, &e)) in actual
        .as_slice()
        .iter()
        .zip(expected.as_slice())
        .enumerate()
    {
        assert!(
            (a - e).abs() <= tol,
            "cell ({}, {}): got {a}, expected {e} (tol {tol})",
            i / cols,
            i % cols
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_masks_partition_columns() {
        let g = grid(3, 5, 1.0);
        let (l, r) = split_masks(&g);
        for row in 0..3 {
            for col in 0..5 {
                assert_eq!(l.get(row, col) + r.get(row, col), 1.0);
                assert_eq!(l.get(row, col) == 1.0, col < 1);
            }
        }
    }

    #[test]
    fn split_masks_boundary_follows_row_count() {
        // wide grid: rows/2 columns go left
        let (l, _) = split_masks(&grid(2, 9, 1.0));
        assert_eq!(l.total(), 2.0);
        assert_eq!(l.get(1, 0), 1.0);
        assert_eq!(l.get(1, 1), 0.0);

        // tall grid: clamped to every column
        let (l, r) = split_masks(&grid(10, 3, 1.0));
        assert_eq!(l.total(), 30.0);
        assert_eq!(r.total(), 0.0);
    }

    #[test]
    fn random_field_is_seeded() {
        let g = grid(4, 4, 1.0);
        let a = random_field(&g, 7, -1.0, 1.0);
        let b = random_field(&g, 7, -1.0, 1.0);
        let c = random_field(&g, 8, -1.0, 1.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_slice().iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn random_field_degenerate_range_is_constant() {
        let g = grid(3, 3, 1.0);
        assert_eq!(random_field(&g, 11, 0.5, 0.5), uniform(&g, 0.5));
        let f = random_field(&g, 11, 2.0, 3.0);
        assert!(f.as_slice().iter().all(|v| (2.0..3.0).contains(v)));
        assert!(f.stats().max > f.stats().min);
    }

    #[test]
    fn checkerboard_alternates() {
        let g = grid(2, 2, 1.0);
        assert_eq!(checkerboard(&g, 1.0, 0.0).as_slice(), &[1.0, 0.0, 0.0, 1.0]);
    }
}
