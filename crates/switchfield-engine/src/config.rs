//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder-input for a [`LockstepSim`](crate::LockstepSim).
//! [`validate()`](SimConfig::validate) checks every structural and numeric
//! invariant up front so that nothing can fail half-way through a run.
//!
//! Both [`SimConfig`] and [`Params`] deserialize from JSON with every key
//! optional; missing keys take the reference values from [`Default`].

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use switchfield_core::{FieldError, Grid, GridError};
use switchfield_kernels::diffusion::STABILITY_LIMIT;
use switchfield_kernels::{DiffusionTerm, Term, DEFAULT_INFLUENCE_MIDPOINT};

// ── Params ─────────────────────────────────────────────────────────

/// Physical parameters of the model. Immutable for the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Time step. Default: 0.1.
    pub dt: f64,
    /// Diffusion coefficient for population A. Default: 0.1.
    pub d_a: f64,
    /// Diffusion coefficient for population B. Default: 0.1.
    pub d_b: f64,
    /// Forcing coupling strength. Default: 0.1.
    pub alpha: f64,
    /// Switching coupling strength. Default: 0.7.
    pub beta: f64,
    /// Switching threshold. Default: 2.0.
    pub delta: f64,
    /// Switching sigmoid steepness. Default: 5.0.
    pub k_sig: f64,
    /// Forcing asymptote. Default: 10.0.
    pub max_strength: f64,
    /// Forcing sigmoid steepness. Default: 0.02.
    pub k: f64,
    /// Inflection time of the forcing curve. Default: 100.0.
    pub influence_midpoint: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            dt: 0.1,
            d_a: 0.1,
            d_b: 0.1,
            alpha: 0.1,
            beta: 0.7,
            delta: 2.0,
            k_sig: 5.0,
            max_strength: 10.0,
            k: 0.02,
            influence_midpoint: DEFAULT_INFLUENCE_MIDPOINT,
        }
    }
}

impl Params {
    /// All couplings off: diffusion, forcing, and switching contribute
    /// nothing, so every step is the identity.
    pub fn inert() -> Self {
        Self {
            d_a: 0.0,
            d_b: 0.0,
            alpha: 0.0,
            beta: 0.0,
            max_strength: 0.0,
            ..Self::default()
        }
    }

    /// Check every parameter's domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("dt", self.dt)?;
        non_negative("d_a", self.d_a)?;
        non_negative("d_b", self.d_b)?;
        non_negative("alpha", self.alpha)?;
        non_negative("beta", self.beta)?;
        finite("delta", self.delta)?;
        positive("k_sig", self.k_sig)?;
        non_negative("max_strength", self.max_strength)?;
        positive("k", self.k)?;
        finite("influence_midpoint", self.influence_midpoint)?;
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite and >= 0",
        });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite and > 0",
        });
    }
    Ok(())
}

// ── StabilityPolicy ────────────────────────────────────────────────

/// What to do when `dt * max(D_a, D_b) / dx^2` exceeds the explicit-Euler
/// stability limit of 1/4.
///
/// The update rule is never altered; this only decides whether the
/// hazard is ignored, logged, or refused at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityPolicy {
    /// Run regardless.
    Ignore,
    /// Log a warning at construction and run. The default.
    #[default]
    Warn,
    /// Refuse to construct with [`ConfigError::Unstable`].
    Reject,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`] or simulator
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions or spacing are invalid.
    Grid(GridError),
    /// A supplied initial field or mask has the wrong shape.
    Field(FieldError),
    /// A model parameter is outside its domain.
    InvalidParameter {
        /// Parameter name as it appears in the config.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },
    /// `dt` exceeds the diffusion stability limit under
    /// [`StabilityPolicy::Reject`].
    Unstable {
        /// Configured time step.
        dt: f64,
        /// Largest stable time step.
        max_dt: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Field(e) => write!(f, "field: {e}"),
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "{name} {reason}, got {value}"),
            Self::Unstable { dt, max_dt } => write!(
                f,
                "dt {dt} exceeds diffusion stability limit {max_dt} \
                 (dt * D / dx^2 must be <= {STABILITY_LIMIT})"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<FieldError> for ConfigError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Rows (axis 0). Default: 50.
    pub nx: u32,
    /// Columns (axis 1). Default: 50.
    pub ny: u32,
    /// Spatial step. Default: 1.0.
    pub dx: f64,
    /// Frames advanced by [`LockstepSim::run`](crate::LockstepSim::run).
    /// Default: 1000.
    pub total_steps: u64,
    /// Model parameters.
    #[serde(flatten)]
    pub params: Params,
    /// Handling of the diffusion stability limit. Default: warn.
    pub stability: StabilityPolicy,
    /// Scan each step's output for NaN/inf before committing it.
    /// Default: false.
    pub nan_check: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            nx: 50,
            ny: 50,
            dx: 1.0,
            total_steps: 1000,
            params: Params::default(),
            stability: StabilityPolicy::default(),
            nan_check: false,
        }
    }
}

impl SimConfig {
    /// Build the grid described by `nx`, `ny`, `dx`.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::new(self.nx, self.ny, self.dx)?)
    }

    /// Largest stable `dt` for the configured diffusion coefficients, or
    /// `None` when diffusion is off.
    pub fn max_stable_dt(&self) -> Result<Option<f64>, ConfigError> {
        let grid = self.grid()?;
        Ok(DiffusionTerm::new(self.params.d_a, self.params.d_b).max_dt(&grid))
    }

    /// Whether `dt` is within the diffusion stability limit.
    pub fn is_stable(&self) -> Result<bool, ConfigError> {
        Ok(match self.max_stable_dt()? {
            Some(max_dt) => self.params.dt <= max_dt,
            None => true,
        })
    }

    /// Validate all structural and numeric invariants.
    ///
    /// Pure: never logs. Under [`StabilityPolicy::Warn`] an unstable `dt`
    /// passes validation; the simulator logs the warning when built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid must be constructible.
        let grid = self.grid()?;
        // 2. Parameters must be in domain.
        self.params.validate()?;
        // 3. Stability, only if the policy refuses unstable runs.
        if self.stability == StabilityPolicy::Reject {
            let diffusion = DiffusionTerm::new(self.params.d_a, self.params.d_b);
            if let Some(max_dt) = diffusion.max_dt(&grid) {
                if self.params.dt > max_dt {
                    return Err(ConfigError::Unstable {
                        dt: self.params.dt,
                        max_dt,
                    });
                }
            }
        }
        Ok(())
    }
}
