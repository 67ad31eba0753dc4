//! The two populations and their forcing masks.

use std::fmt;

use switchfield_core::{Field, FieldError, Grid};

/// Identifies one of the two populations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Population {
    /// Population A (`C_a`).
    A,
    /// Population B (`C_b`).
    B,
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "c_a"),
            Self::B => write!(f, "c_b"),
        }
    }
}

/// Concentrations `C_a`, `C_b` and masks `A_mask`, `B_mask` on one grid.
///
/// All four fields always share the grid's shape. Masks are read-only
/// after construction; concentrations are only written by the
/// [`Stepper`](crate::Stepper) when it commits a step.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldState {
    grid: Grid,
    c_a: Field,
    c_b: Field,
    a_mask: Field,
    b_mask: Field,
}

impl FieldState {
    /// The reference initial condition: population A fills columns
    /// `[0, min(rows/2, cols))`, population B fills the remaining columns,
    /// and each mask mirrors its population.
    pub fn split_halves(grid: Grid) -> Self {
        let half = (grid.rows() as usize / 2).min(grid.cols() as usize);
        let left = Field::from_fn(&grid, |_, c| if c < half { 1.0 } else { 0.0 });
        let right = Field::from_fn(&grid, |_, c| if c < half { 0.0 } else { 1.0 });
        Self {
            grid,
            c_a: left.clone(),
            c_b: right.clone(),
            a_mask: left,
            b_mask: right,
        }
    }

    /// Assemble a state from explicit fields.
    ///
    /// Returns [`FieldError::ShapeMismatch`] naming the first field whose
    /// shape differs from `grid`.
    pub fn from_parts(
        grid: Grid,
        c_a: Field,
        c_b: Field,
        a_mask: Field,
        b_mask: Field,
    ) -> Result<Self, FieldError> {
        c_a.check_shape("c_a", &grid)?;
        c_b.check_shape("c_b", &grid)?;
        a_mask.check_shape("a_mask", &grid)?;
        b_mask.check_shape("b_mask", &grid)?;
        Ok(Self {
            grid,
            c_a,
            c_b,
            a_mask,
            b_mask,
        })
    }

    /// Grid shared by all four fields.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Population A.
    pub fn c_a(&self) -> &Field {
        &self.c_a
    }

    /// Population B.
    pub fn c_b(&self) -> &Field {
        &self.c_b
    }

    /// Forcing mask for A.
    pub fn a_mask(&self) -> &Field {
        &self.a_mask
    }

    /// Forcing mask for B.
    pub fn b_mask(&self) -> &Field {
        &self.b_mask
    }

    /// Concentration field of `population`.
    pub fn population(&self, population: Population) -> &Field {
        match population {
            Population::A => &self.c_a,
            Population::B => &self.c_b,
        }
    }

    /// Whether any mask cell is negative.
    pub fn has_negative_mask(&self) -> bool {
        self.a_mask
            .as_slice()
            .iter()
            .chain(self.b_mask.as_slice())
            .any(|&m| m < 0.0)
    }

    /// Split into `(c_a, c_b, a_mask, b_mask)`.
    pub fn into_parts(self) -> (Field, Field, Field, Field) {
        (self.c_a, self.c_b, self.a_mask, self.b_mask)
    }

    /// Overwrite both concentrations from row-major buffers of the grid's
    /// cell count.
    pub(crate) fn commit(&mut self, next_a: &[f64], next_b: &[f64]) {
        self.c_a.as_mut_slice().copy_from_slice(next_a);
        self.c_b.as_mut_slice().copy_from_slice(next_b);
    }
}
