//! Core types for the switchfield simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! periodic [`Grid`] topology, dense row-major [`Field`] storage, and the
//! error types raised when either is constructed with bad dimensions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod grid;

pub use error::{FieldError, GridError};
pub use field::{Field, FieldStats};
pub use grid::Grid;
