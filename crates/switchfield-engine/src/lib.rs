//! Time integration and driving for switchfield simulations.
//!
//! [`Stepper`] is the explicit-Euler integrator: it sums the derivative
//! terms over a frozen snapshot of [`FieldState`] and commits the new
//! fields in one go. [`LockstepSim`] owns the state and a stepper and is
//! what a driver (renderer, CLI, test) calls once per frame.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod frame;
pub mod hash;
pub mod lockstep;
pub mod metrics;
pub mod state;
pub mod stepper;

pub use config::{ConfigError, Params, SimConfig, StabilityPolicy};
pub use frame::{FrameSink, FrameView};
pub use hash::{field_hash, state_hash};
pub use lockstep::{LockstepSim, RunSummary, StepError, StepResult};
pub use metrics::StepMetrics;
pub use state::{FieldState, Population};
pub use stepper::{StepOutcome, Stepper};
