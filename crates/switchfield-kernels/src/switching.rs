//! Switching term: mass loss driven by the local population difference.
//!
//! ```text
//! diff         = |C_a - C_b| - delta
//! theta_a_to_b = beta * C_a * sigmoid(diff)
//! theta_b_to_a = beta * C_b * sigmoid(diff)
//! dC_a        -= theta_a_to_b
//! dC_b        -= theta_b_to_a
//! ```
//!
//! Both rates share the same unsigned `diff`; each is scaled only by its
//! own population. Whether the direction of the difference should matter
//! is an open modelling question, so the formula is kept as written.

use crate::sigmoid::SwitchingSigmoid;
use crate::term::{Derivatives, Term, TermContext};

/// Sigmoidal switching between the two populations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchingTerm {
    beta: f64,
    delta: f64,
    sigmoid: SwitchingSigmoid,
}

impl SwitchingTerm {
    /// Create a switching term with coupling `beta`, threshold `delta`, and
    /// switching curve `sigmoid`.
    pub fn new(beta: f64, delta: f64, sigmoid: SwitchingSigmoid) -> Self {
        Self {
            beta,
            delta,
            sigmoid,
        }
    }

    /// Coupling strength.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Switching threshold.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// `(theta_a_to_b, theta_b_to_a)` for a single cell.
    #[inline]
    pub fn rates(&self, a: f64, b: f64) -> (f64, f64) {
        let w = self.sigmoid.eval((a - b).abs() - self.delta);
        (self.beta * a * w, self.beta * b * w)
    }
}

impl Term for SwitchingTerm {
    fn name(&self) -> &str {
        "switching"
    }

    fn accumulate(&self, ctx: &TermContext<'_>, _scratch: &mut [f64], out: &mut Derivatives<'_>) {
        let a = ctx.c_a().as_slice();
        let b = ctx.c_b().as_slice();
        for (((da, db), &av), &bv) in out.d_a.iter_mut().zip(out.d_b.iter_mut()).zip(a).zip(b) {
            let (theta_ab, theta_ba) = self.rates(av, bv);
            *da -= theta_ab;
            *db -= theta_ba;
        }
    }
}
