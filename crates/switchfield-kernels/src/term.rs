//! The [`Term`] trait, its read-only [`TermContext`], and the
//! [`Derivatives`] accumulator.
//!
//! A step of the integrator is a sum of independent contributions to
//! `dC_a/dt` and `dC_b/dt`. Each contribution is a `Term`. Terms only ever
//! see the frozen pre-step snapshot through [`TermContext`], so no term can
//! observe a partially updated field.

use switchfield_core::{Field, Grid};

/// Read-only view of the pre-step state handed to every [`Term`].
#[derive(Clone, Copy, Debug)]
pub struct TermContext<'a> {
    grid: &'a Grid,
    c_a: &'a Field,
    c_b: &'a Field,
    a_mask: &'a Field,
    b_mask: &'a Field,
    time: f64,
}

impl<'a> TermContext<'a> {
    /// Bundle a snapshot. All fields must be shaped like `grid`; the
    /// engine checks this once at construction.
    pub fn new(
        grid: &'a Grid,
        c_a: &'a Field,
        c_b: &'a Field,
        a_mask: &'a Field,
        b_mask: &'a Field,
        time: f64,
    ) -> Self {
        Self {
            grid,
            c_a,
            c_b,
            a_mask,
            b_mask,
            time,
        }
    }

    /// Grid topology.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Population A at the start of the step.
    pub fn c_a(&self) -> &'a Field {
        self.c_a
    }

    /// Population B at the start of the step.
    pub fn c_b(&self) -> &'a Field {
        self.c_b
    }

    /// Forcing mask for A.
    pub fn a_mask(&self) -> &'a Field {
        self.a_mask
    }

    /// Forcing mask for B.
    pub fn b_mask(&self) -> &'a Field {
        self.b_mask
    }

    /// Simulated time `t = step_index * dt`.
    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Mutable derivative buffers that terms add into.
///
/// Both slices are row-major and `grid.cell_count()` long.
#[derive(Debug)]
pub struct Derivatives<'a> {
    /// `dC_a/dt`.
    pub d_a: &'a mut [f64],
    /// `dC_b/dt`.
    pub d_b: &'a mut [f64],
}

/// One additive contribution to the time derivative of both populations.
///
/// # Contract
///
/// - `accumulate()` MUST be deterministic: same context, same additions.
/// - `&self`: terms are stateless; per-call temporaries go in `scratch`.
/// - Terms add (`+=`) into [`Derivatives`]; they never overwrite.
///
/// # Examples
///
/// A term that pulls both fields towards zero:
///
/// ```
/// use switchfield_kernels::{Derivatives, Term, TermContext};
///
/// struct Decay(f64);
///
/// impl Term for Decay {
///     fn name(&self) -> &str { "decay" }
///
///     fn accumulate(&self, ctx: &TermContext<'_>, _scratch: &mut [f64], out: &mut Derivatives<'_>) {
///         for (d, &c) in out.d_a.iter_mut().zip(ctx.c_a().as_slice()) {
///             *d -= self.0 * c;
///         }
///         for (d, &c) in out.d_b.iter_mut().zip(ctx.c_b().as_slice()) {
///             *d -= self.0 * c;
///         }
///     }
/// }
///
/// assert_eq!(Decay(0.5).name(), "decay");
/// ```
pub trait Term: Send + 'static {
    /// Human-readable name for metrics and logging.
    fn name(&self) -> &str;

    /// Largest `dt` for which this term is stable under explicit Euler on
    /// `grid`. `None` imposes no constraint.
    fn max_dt(&self, _grid: &Grid) -> Option<f64> {
        None
    }

    /// Add this term's contribution into `out`.
    ///
    /// `scratch` is at least `grid.cell_count()` long and holds garbage
    /// on entry.
    fn accumulate(&self, ctx: &TermContext<'_>, scratch: &mut [f64], out: &mut Derivatives<'_>);
}
