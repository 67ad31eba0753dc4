//! Switchfield: two coupled concentration fields on a periodic 2D grid.
//!
//! Each population diffuses, relaxes towards a masked source whose strength
//! ramps up over time, and sheds mass wherever the two populations differ
//! by more than a threshold. This is the facade crate that re-exports the
//! public API of the sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use switchfield::prelude::*;
//!
//! let config = SimConfig { nx: 16, ny: 16, total_steps: 20, ..SimConfig::default() };
//! let mut sim = LockstepSim::new(config).unwrap();
//!
//! let result = sim.step_sync().unwrap();
//! assert_eq!(result.frame.frame(), 1);
//!
//! let mut sink = |frame: &FrameView<'_>| {
//!     let (a, b) = frame.stats();
//!     assert!(a.max.is_finite() && b.max.is_finite());
//!     std::ops::ControlFlow::Continue(())
//! };
//! let summary = sim.run(&mut sink).unwrap();
//! assert_eq!(summary.steps, 20);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `switchfield-core` | `Grid`, `Field`, shape errors |
//! | [`kernels`] | `switchfield-kernels` | Laplacian, sigmoids, derivative terms |
//! | [`engine`] | `switchfield-engine` | Config, stepper, lockstep driver |
//! | [`runner`] | this crate | Headless runner used by `switchfield-run` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid topology and field storage (`switchfield-core`).
pub use switchfield_core as types;

/// Numerical kernels (`switchfield-kernels`).
///
/// The [`kernels::Term`] trait is the extension point for additional
/// derivative contributions.
pub use switchfield_kernels as kernels;

/// Configuration, time integration, and driving (`switchfield-engine`).
pub use switchfield_engine as engine;

pub mod runner;

/// Common imports for typical usage.
///
/// ```rust
/// use switchfield::prelude::*;
/// ```
pub mod prelude {
    // Storage
    pub use switchfield_core::{Field, FieldStats, Grid};

    // Errors
    pub use switchfield_core::{FieldError, GridError};
    pub use switchfield_engine::{ConfigError, StepError};

    // Kernels
    pub use switchfield_kernels::{
        laplacian, BoundedInfluence, Derivatives, SwitchingSigmoid, Term, TermContext,
    };

    // Engine
    pub use switchfield_engine::{
        state_hash, FieldState, FrameSink, FrameView, LockstepSim, Params, Population,
        RunSummary, SimConfig, StabilityPolicy, StepMetrics, StepResult, Stepper,
    };
}
