//! Test utilities and fixtures for switchfield development.
//!
//! Only depends on `switchfield-core`, so any crate in the workspace can
//! use it from its unit tests without pulling in a second copy of itself.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    assert_fields_close, checkerboard, grid, random_field, split_masks, uniform,
};
