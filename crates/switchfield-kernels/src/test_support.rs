//! Derivative buffers for exercising a single [`Term`] in isolation.

use switchfield_core::Grid;

use crate::term::{Derivatives, Term, TermContext};

pub(crate) struct TermBuffers {
    pub d_a: Vec<f64>,
    pub d_b: Vec<f64>,
    scratch: Vec<f64>,
}

impl TermBuffers {
    pub fn new(grid: &Grid) -> Self {
        let n = grid.cell_count();
        Self {
            d_a: vec![0.0; n],
            d_b: vec![0.0; n],
            scratch: vec![f64::NAN; n],
        }
    }

    pub fn run(&mut self, term: &dyn Term, ctx: &TermContext<'_>) {
        let mut out = Derivatives {
            d_a: &mut self.d_a,
            d_b: &mut self.d_b,
        };
        term.accumulate(ctx, &mut self.scratch, &mut out);
    }
}
