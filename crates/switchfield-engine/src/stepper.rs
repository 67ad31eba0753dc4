//! Explicit-Euler integrator over a pipeline of derivative terms.
//!
//! A step is split in two so that callers can inspect the result before it
//! becomes visible:
//!
//! 1. [`stage()`](Stepper::stage) zeroes the staging buffers, lets every
//!    [`Term`] add its contribution against the frozen snapshot, then
//!    turns the buffers into `C + dt * dC/dt` in place.
//! 2. [`commit()`](Stepper::commit) copies both staged fields into the
//!    state at once.
//!
//! Nothing in the state is written until commit, so every term of a step
//! observes the same pre-step values.

use std::time::Instant;

use switchfield_core::{FieldError, Grid};
use switchfield_kernels::{
    BoundedInfluence, Derivatives, DiffusionTerm, ForcingTerm, SwitchingSigmoid, SwitchingTerm,
    Term, TermContext,
};

use crate::config::Params;
use crate::state::{FieldState, Population};

/// What [`Stepper::stage`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Index of the step that was staged.
    pub step_index: u64,
    /// Simulated time the terms were evaluated at.
    pub time: f64,
    /// Per-term accumulation times: `(name, microseconds)`.
    pub term_us: Vec<(String, u64)>,
}

/// The time integrator.
pub struct Stepper {
    grid: Grid,
    dt: f64,
    terms: Vec<Box<dyn Term>>,
    stage_a: Vec<f64>,
    stage_b: Vec<f64>,
    scratch: Vec<f64>,
    staged: bool,
}

impl Stepper {
    /// The model pipeline for `params`: diffusion, then forcing, then
    /// switching.
    pub fn new(grid: Grid, params: &Params) -> Self {
        let influence =
            BoundedInfluence::with_midpoint(params.max_strength, params.k, params.influence_midpoint);
        let terms: Vec<Box<dyn Term>> = vec![
            Box::new(DiffusionTerm::new(params.d_a, params.d_b)),
            Box::new(ForcingTerm::new(params.alpha, influence)),
            Box::new(SwitchingTerm::new(
                params.beta,
                params.delta,
                SwitchingSigmoid::new(params.k_sig),
            )),
        ];
        Self::with_terms(grid, params.dt, terms)
    }

    /// A stepper running an arbitrary term pipeline. Terms accumulate in
    /// the given order.
    pub fn with_terms(grid: Grid, dt: f64, terms: Vec<Box<dyn Term>>) -> Self {
        let n = grid.cell_count();
        Self {
            grid,
            dt,
            terms,
            stage_a: vec![0.0; n],
            stage_b: vec![0.0; n],
            scratch: vec![0.0; n],
            staged: false,
        }
    }

    /// Time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Grid the buffers are sized for.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Names of the terms, in pipeline order.
    pub fn term_names(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.name()).collect()
    }

    /// Tightest stability bound over all terms, if any term has one.
    pub fn max_dt(&self) -> Option<f64> {
        self.terms
            .iter()
            .filter_map(|t| t.max_dt(&self.grid))
            .reduce(f64::min)
    }

    /// Simulated time at the start of step `step_index`.
    pub fn time_at(&self, step_index: u64) -> f64 {
        step_index as f64 * self.dt
    }

    /// Whether a staged result is waiting for [`commit()`](Self::commit).
    pub fn is_staged(&self) -> bool {
        self.staged
    }

    /// Compute step `step_index` from `state` into the staging buffers.
    ///
    /// Terms see this stepper's grid, so the spacing used is the one
    /// [`max_dt()`](Self::max_dt) was computed for.
    ///
    /// Returns [`FieldError::ShapeMismatch`] and stages nothing if `state`
    /// has a different shape.
    pub fn stage(&mut self, state: &FieldState, step_index: u64) -> Result<StepOutcome, FieldError> {
        if state.grid().shape() != self.grid.shape() {
            return Err(FieldError::ShapeMismatch {
                name: "state",
                expected: self.grid.shape(),
                actual: state.grid().shape(),
            });
        }
        let time = self.time_at(step_index);
        let ctx = TermContext::new(
            &self.grid,
            state.c_a(),
            state.c_b(),
            state.a_mask(),
            state.b_mask(),
            time,
        );

        self.stage_a.fill(0.0);
        self.stage_b.fill(0.0);

        let mut term_us = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            let start = Instant::now();
            let mut out = Derivatives {
                d_a: &mut self.stage_a,
                d_b: &mut self.stage_b,
            };
            term.accumulate(&ctx, &mut self.scratch, &mut out);
            term_us.push((term.name().to_string(), start.elapsed().as_micros() as u64));
        }

        let dt = self.dt;
        for (next, &c) in self.stage_a.iter_mut().zip(state.c_a().as_slice()) {
            *next = c + dt * *next;
        }
        for (next, &c) in self.stage_b.iter_mut().zip(state.c_b().as_slice()) {
            *next = c + dt * *next;
        }
        self.staged = true;

        Ok(StepOutcome {
            step_index,
            time,
            term_us,
        })
    }

    /// First NaN or infinite cell in the staged result, if any.
    pub fn staged_non_finite(&self) -> Option<(Population, usize)> {
        if !self.staged {
            return None;
        }
        if let Some(i) = self.stage_a.iter().position(|v| !v.is_finite()) {
            return Some((Population::A, i));
        }
        self.stage_b
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (Population::B, i))
    }

    /// Drop the staged result without applying it.
    pub fn discard(&mut self) {
        self.staged = false;
    }

    /// Apply the staged result to `state`. Returns `false` and leaves
    /// `state` untouched if nothing is staged.
    pub fn commit(&mut self, state: &mut FieldState) -> bool {
        if !self.staged {
            return false;
        }
        state.commit(&self.stage_a, &self.stage_b);
        self.staged = false;
        true
    }

    /// [`stage()`](Self::stage) then [`commit()`](Self::commit).
    pub fn advance(
        &mut self,
        state: &mut FieldState,
        step_index: u64,
    ) -> Result<StepOutcome, FieldError> {
        let outcome = self.stage(state, step_index)?;
        self.commit(state);
        Ok(outcome)
    }
}

impl std::fmt::Debug for Stepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepper")
            .field("grid", &self.grid)
            .field("dt", &self.dt)
            .field("terms", &self.term_names())
            .field("staged", &self.staged)
            .finish()
    }
}
