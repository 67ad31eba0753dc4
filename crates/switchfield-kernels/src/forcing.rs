//! Forcing term: `+ alpha * (mask * s(t) - C)` for each population.

use crate::sigmoid::BoundedInfluence;
use crate::term::{Derivatives, Term, TermContext};

/// Relaxation of each population towards its mask, scaled by a forcing
/// strength that grows over simulated time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcingTerm {
    alpha: f64,
    influence: BoundedInfluence,
}

impl ForcingTerm {
    /// Create a forcing term with coupling `alpha` and strength curve
    /// `influence`.
    pub fn new(alpha: f64, influence: BoundedInfluence) -> Self {
        Self { alpha, influence }
    }

    /// Coupling strength.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Forcing strength at simulated time `t`.
    pub fn strength(&self, t: f64) -> f64 {
        self.influence.eval(t)
    }
}

impl Term for ForcingTerm {
    fn name(&self) -> &str {
        "forcing"
    }

    fn accumulate(&self, ctx: &TermContext<'_>, _scratch: &mut [f64], out: &mut Derivatives<'_>) {
        let s = self.influence.eval(ctx.time());

        let a = ctx.c_a().as_slice();
        let mask = ctx.a_mask().as_slice();
        for ((d, &c), &m) in out.d_a.iter_mut().zip(a).zip(mask) {
            *d += self.alpha * (m * s - c);
        }

        let b = ctx.c_b().as_slice();
        let mask = ctx.b_mask().as_slice();
        for ((d, &c), &m) in out.d_b.iter_mut().zip(b).zip(mask) {
            *d += self.alpha * (m * s - c);
        }
    }
}
