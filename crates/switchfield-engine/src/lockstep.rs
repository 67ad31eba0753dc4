//! Lockstep (synchronous) simulator.
//!
//! [`LockstepSim`] owns the [`FieldState`], the [`Stepper`], and the step
//! counter. Each call to [`step()`](LockstepSim::step) or
//! [`step_sync()`](LockstepSim::step_sync) runs one complete Euler step and
//! returns a [`FrameView`] that borrows the simulator, so no reader can
//! observe a half-applied step and no step can run while a frame is held.
//!
//! `LockstepSim` is [`Send`]; all mutation goes through `&mut self`.

use std::error::Error;
use std::fmt;
use std::ops::ControlFlow;
use std::time::Instant;

use switchfield_core::{FieldError, Grid};

use crate::config::{ConfigError, SimConfig, StabilityPolicy};
use crate::frame::{FrameSink, FrameView};
use crate::hash::state_hash;
use crate::metrics::StepMetrics;
use crate::state::{FieldState, Population};
use crate::stepper::Stepper;

// Compile-time assertion: LockstepSim is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LockstepSim>();
    }
};

// ── StepError ──────────────────────────────────────────────────────

/// Errors returned by [`LockstepSim::step()`].
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The step produced NaN or infinity. The step was not committed and
    /// the simulator is halted until [`reset()`](LockstepSim::reset).
    NonFinite {
        /// Population holding the first bad cell.
        population: Population,
        /// Row-major index of the first bad cell.
        cell_index: usize,
        /// Step that produced it.
        step_index: u64,
    },
    /// A previous step failed the non-finite check.
    Halted,
    /// The state no longer fits the stepper's grid.
    Field(FieldError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite {
                population,
                cell_index,
                step_index,
            } => write!(
                f,
                "non-finite value in {population} at cell {cell_index} during step {step_index}"
            ),
            Self::Halted => write!(f, "simulation halted after a non-finite step; reset to continue"),
            Self::Field(e) => write!(f, "state does not fit the stepper: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for StepError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

// ── StepResult / RunSummary ────────────────────────────────────────

/// Result of a successful step.
#[derive(Debug)]
pub struct StepResult<'a> {
    /// State after the step.
    pub frame: FrameView<'a>,
    /// Metrics for this step.
    pub metrics: StepMetrics,
}

/// Outcome of [`LockstepSim::run()`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Steps committed during the run.
    pub steps: u64,
    /// Simulated time of the last committed step.
    pub final_time: f64,
    /// [`state_hash`] of the final state.
    pub hash: u64,
    /// Sum of `C_a` at the end.
    pub mass_a: f64,
    /// Sum of `C_b` at the end.
    pub mass_b: f64,
}

// ── LockstepSim ────────────────────────────────────────────────────

/// Single-threaded simulator advanced one step per call.
///
/// # Example
///
/// ```
/// use switchfield_engine::{LockstepSim, SimConfig};
///
/// let config = SimConfig { nx: 8, ny: 8, ..SimConfig::default() };
/// let mut sim = LockstepSim::new(config).unwrap();
/// for _ in 0..10 {
///     let result = sim.step_sync().unwrap();
///     assert!(result.frame.c_a().as_slice().iter().all(|v| v.is_finite()));
/// }
/// assert_eq!(sim.current_step(), 10);
/// ```
#[derive(Debug)]
pub struct LockstepSim {
    config: SimConfig,
    state: FieldState,
    initial: FieldState,
    stepper: Stepper,
    next_step: u64,
    frame: u64,
    time: f64,
    last_metrics: StepMetrics,
    halted: bool,
}

impl LockstepSim {
    /// Validate `config` and seed the split-halves initial condition.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        Self::build(config, FieldState::split_halves(grid))
    }

    /// Validate `config` and start from `state`.
    ///
    /// Every field of `state` must have the configured `(nx, ny)` shape;
    /// the configured `dx` replaces whatever spacing `state` carried.
    pub fn with_state(config: SimConfig, state: FieldState) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        let (c_a, c_b, a_mask, b_mask) = state.into_parts();
        let state = FieldState::from_parts(grid, c_a, c_b, a_mask, b_mask)?;
        Self::build(config, state)
    }

    fn build(config: SimConfig, state: FieldState) -> Result<Self, ConfigError> {
        let grid = *state.grid();
        let stepper = Stepper::new(grid, &config.params);

        if config.stability == StabilityPolicy::Warn {
            if let Some(max_dt) = stepper.max_dt() {
                if config.params.dt > max_dt {
                    log::warn!(
                        "dt {} exceeds diffusion stability limit {max_dt}; the run may blow up",
                        config.params.dt
                    );
                }
            }
        }
        if state.has_negative_mask() {
            log::warn!("forcing mask contains negative values");
        }
        log::info!(
            "created {}x{} simulation, dt={}, terms={:?}",
            grid.rows(),
            grid.cols(),
            config.params.dt,
            stepper.term_names()
        );

        Ok(Self {
            config,
            initial: state.clone(),
            state,
            stepper,
            next_step: 0,
            frame: 0,
            time: 0.0,
            last_metrics: StepMetrics::default(),
            halted: false,
        })
    }

    /// Advance by one step evaluated at `t = step_index * dt`.
    ///
    /// The internal counter moves to `step_index + 1`, saturating at
    /// `u64::MAX`, so a following [`step_sync()`](Self::step_sync) continues
    /// from here.
    ///
    /// # Errors
    ///
    /// [`StepError::Halted`] if an earlier step failed.
    /// [`StepError::NonFinite`] if `nan_check` is on and this step produced
    /// NaN or infinity; the state is left at the previous step.
    /// [`StepError::Field`] if the state and stepper grids disagree.
    pub fn step(&mut self, step_index: u64) -> Result<StepResult<'_>, StepError> {
        if self.halted {
            return Err(StepError::Halted);
        }
        let start = Instant::now();
        let outcome = self.stepper.stage(&self.state, step_index)?;

        if self.config.nan_check {
            if let Some((population, cell_index)) = self.stepper.staged_non_finite() {
                self.stepper.discard();
                self.halted = true;
                log::error!(
                    "step {step_index}: non-finite {population} at cell {cell_index}, halting"
                );
                return Err(StepError::NonFinite {
                    population,
                    cell_index,
                    step_index,
                });
            }
        }

        self.stepper.commit(&mut self.state);
        self.next_step = step_index.saturating_add(1);
        self.frame = step_index.saturating_add(1);
        self.time = outcome.time;

        let metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            term_us: outcome.term_us,
            mass_a: self.state.c_a().total(),
            mass_b: self.state.c_b().total(),
        };
        log::debug!(
            "step {step_index} t={} mass_a={} mass_b={} ({} us)",
            self.time,
            metrics.mass_a,
            metrics.mass_b,
            metrics.total_us
        );
        self.last_metrics = metrics.clone();

        Ok(StepResult {
            frame: self.frame(),
            metrics,
        })
    }

    /// Advance by one step at the internal counter.
    pub fn step_sync(&mut self) -> Result<StepResult<'_>, StepError> {
        self.step(self.next_step)
    }

    /// Drive `total_steps` steps from the current counter.
    ///
    /// `sink` sees the current frame first, then every completed step.
    /// It can stop the run early by returning [`ControlFlow::Break`].
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> Result<RunSummary, StepError> {
        let mut steps = 0;
        if sink.on_frame(&self.frame()).is_continue() {
            for _ in 0..self.config.total_steps {
                let result = self.step_sync()?;
                steps += 1;
                if let ControlFlow::Break(()) = sink.on_frame(&result.frame) {
                    break;
                }
            }
        }
        let summary = RunSummary {
            steps,
            final_time: self.time,
            hash: state_hash(&self.state),
            mass_a: self.state.c_a().total(),
            mass_b: self.state.c_b().total(),
        };
        log::info!(
            "run finished: {} steps, t={}, hash={:016x}",
            summary.steps,
            summary.final_time,
            summary.hash
        );
        Ok(summary)
    }

    /// Restore the initial state and counter and clear a halt.
    pub fn reset(&mut self) -> FrameView<'_> {
        self.state = self.initial.clone();
        self.stepper.discard();
        self.next_step = 0;
        self.frame = 0;
        self.time = 0.0;
        self.last_metrics = StepMetrics::default();
        self.halted = false;
        log::info!("simulation reset");
        self.frame()
    }

    /// Current state.
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// View of the current state.
    pub fn frame(&self) -> FrameView<'_> {
        FrameView::new(&self.state, self.frame, self.time)
    }

    /// Index the next [`step_sync()`](Self::step_sync) will use.
    pub fn current_step(&self) -> u64 {
        self.next_step
    }

    /// Configuration the simulator was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Grid topology.
    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Whether a non-finite step has halted the simulator.
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
