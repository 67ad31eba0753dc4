//! Numerical kernels for the switchfield simulator.
//!
//! - [`laplacian`]: 5-point periodic Laplacian (the diffusion operator)
//! - [`SwitchingSigmoid`] / [`BoundedInfluence`]: the two logistic curves
//! - [`Term`]: the additive derivative-term seam, with the three terms the
//!   integrator runs each step: [`DiffusionTerm`], [`ForcingTerm`],
//!   [`SwitchingTerm`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod diffusion;
pub mod forcing;
pub mod laplacian;
pub mod sigmoid;
pub mod switching;
pub mod term;

pub use diffusion::DiffusionTerm;
pub use forcing::ForcingTerm;
pub use laplacian::{laplacian, laplacian_at, laplacian_into};
pub use sigmoid::{BoundedInfluence, SwitchingSigmoid, DEFAULT_INFLUENCE_MIDPOINT};
pub use switching::SwitchingTerm;
pub use term::{Derivatives, Term, TermContext};

#[cfg(test)]
pub(crate) mod test_support;
