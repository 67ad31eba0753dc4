//! Error types for grid and field construction.

use std::error::Error;
use std::fmt;

/// Errors arising from [`Grid`](crate::Grid) construction.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Attempted to construct a grid with zero rows or columns.
    EmptyGrid {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        cols: u32,
    },
    /// A dimension exceeds the maximum supported size.
    DimensionTooLarge {
        /// Name of the offending dimension (`"rows"` or `"cols"`).
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
    /// Spatial step is NaN, infinite, zero, or negative.
    InvalidSpacing {
        /// The invalid value.
        dx: f64,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one cell, got {rows}x{cols}")
            }
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum of {max}")
            }
            Self::InvalidSpacing { dx } => {
                write!(f, "dx must be finite and positive, got {dx}")
            }
        }
    }
}

impl Error for GridError {}

/// Errors arising from [`Field`](crate::Field) construction or combination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Two arrays that must share a shape do not.
    ShapeMismatch {
        /// Which array was being checked (e.g. `"a_mask"`).
        name: &'static str,
        /// The shape it was required to have, as `(rows, cols)`.
        expected: (u32, u32),
        /// The shape it actually has.
        actual: (u32, u32),
    },
    /// A flat buffer does not hold exactly `rows * cols` values.
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Provided length.
        actual: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "{name} has shape {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "buffer holds {actual} values, expected {expected}")
            }
        }
    }
}

impl Error for FieldError {}
