//! Diffusion term: `+ D * laplacian(C)` for each population.

use switchfield_core::Grid;

use crate::laplacian::laplacian_into;
use crate::term::{Derivatives, Term, TermContext};

/// Stability limit of `dt * D / dx^2` for explicit Euler with the 5-point
/// stencil in two dimensions.
pub const STABILITY_LIMIT: f64 = 0.25;

/// Periodic diffusion of both populations with independent coefficients.
///
/// Each step adds `d_a * lap(C_a)` to `dC_a` and `d_b * lap(C_b)` to `dC_b`,
/// with the Laplacian taken from the pre-step snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffusionTerm {
    d_a: f64,
    d_b: f64,
}

impl DiffusionTerm {
    /// Create a diffusion term with coefficients `D_a` and `D_b`.
    pub fn new(d_a: f64, d_b: f64) -> Self {
        Self { d_a, d_b }
    }

    /// Coefficient for population A.
    pub fn d_a(&self) -> f64 {
        self.d_a
    }

    /// Coefficient for population B.
    pub fn d_b(&self) -> f64 {
        self.d_b
    }
}

impl Term for DiffusionTerm {
    fn name(&self) -> &str {
        "diffusion"
    }

    fn max_dt(&self, grid: &Grid) -> Option<f64> {
        let d = self.d_a.max(self.d_b);
        if d > 0.0 {
            // dt * D / dx^2 <= 1/4
            Some(STABILITY_LIMIT * grid.dx() * grid.dx() / d)
        } else {
            None
        }
    }

    fn accumulate(&self, ctx: &TermContext<'_>, scratch: &mut [f64], out: &mut Derivatives<'_>) {
        let n = ctx.grid().cell_count();
        let lap = &mut scratch[..n];

        laplacian_into(ctx.c_a(), ctx.grid(), lap);
        for (d, &l) in out.d_a.iter_mut().zip(lap.iter()) {
            *d += self.d_a * l;
        }

        laplacian_into(ctx.c_b(), ctx.grid(), lap);
        for (d, &l) in out.d_b.iter_mut().zip(lap.iter()) {
            *d += self.d_b * l;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TermBuffers;
    use switchfield_core::Field;
    use switchfield_test_utils::{checkerboard, grid};

    #[test]
    fn max_dt_uses_larger_coefficient() {
        let g = grid(4, 4, 1.0);
        let term = DiffusionTerm::new(0.1, 0.5);
        let dt = term.max_dt(&g).unwrap();
        assert!((dt - 0.5).abs() < 1e-12, "0.25 / 0.5 = 0.5, got {dt}");
    }

    #[test]
    fn max_dt_scales_with_spacing() {
        let g = grid(4, 4, 2.0);
        let dt = DiffusionTerm::new(1.0, 1.0).max_dt(&g).unwrap();
        assert!((dt - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_coefficients_impose_no_limit() {
        let g = grid(4, 4, 1.0);
        assert!(DiffusionTerm::new(0.0, 0.0).max_dt(&g).is_none());
    }

    #[test]
    fn adds_scaled_laplacian() {
        let g = grid(3, 3, 1.0);
        let mut c_a = Field::zeros(&g);
        c_a.set(1, 1, 1.0);
        let c_b = Field::filled(&g, 2.0);
        let mask = Field::zeros(&g);

        let mut bufs = TermBuffers::new(&g);
        bufs.d_a.fill(10.0);
        let ctx = TermContext::new(&g, &c_a, &c_b, &mask, &mask, 0.0);
        bufs.run(&DiffusionTerm::new(0.5, 0.3), &ctx);

        // centre: 10 + 0.5 * -4, neighbour: 10 + 0.5 * 1
        assert_eq!(bufs.d_a[4], 8.0);
        assert_eq!(bufs.d_a[1], 10.5);
        assert_eq!(bufs.d_a[0], 10.0);
        // uniform B has zero Laplacian
        assert!(bufs.d_b.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn checkerboard_decays_at_full_rate() {
        let g = grid(4, 4, 1.0);
        let c_a = checkerboard(&g, 1.0, 0.0);
        let c_b = checkerboard(&g, 0.0, 1.0);
        let mask = Field::zeros(&g);

        let mut bufs = TermBuffers::new(&g);
        let ctx = TermContext::new(&g, &c_a, &c_b, &mask, &mask, 0.0);
        bufs.run(&DiffusionTerm::new(0.25, 0.25), &ctx);

        // lap = -4 on high cells, +4 on low cells
        assert_eq!(&bufs.d_a[..4], &[-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(&bufs.d_b[..4], &[1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn conserves_total_derivative() {
        let g = grid(5, 4, 1.0);
        let c_a = Field::from_fn(&g, |r, c| ((r * 3 + c) % 4) as f64);
        let c_b = Field::from_fn(&g, |r, c| (r * c) as f64);
        let mask = Field::zeros(&g);

        let mut bufs = TermBuffers::new(&g);
        let ctx = TermContext::new(&g, &c_a, &c_b, &mask, &mask, 0.0);
        bufs.run(&DiffusionTerm::new(0.25, 0.5), &ctx);

        assert_eq!(bufs.d_a.iter().sum::<f64>(), 0.0);
        assert_eq!(bufs.d_b.iter().sum::<f64>(), 0.0);
    }
}
