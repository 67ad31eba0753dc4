//! Per-frame read-only views and the sink that consumes them.

use std::ops::ControlFlow;

use switchfield_core::{Field, FieldError, FieldStats, Grid};

use crate::state::FieldState;

/// Borrowed view of the state after a step.
///
/// Holding a `FrameView` borrows the simulator, so it must be dropped
/// before the next step.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    state: &'a FieldState,
    frame: u64,
    time: f64,
}

impl<'a> FrameView<'a> {
    /// View `state` as frame number `frame` at simulated time `time`.
    pub fn new(state: &'a FieldState, frame: u64, time: f64) -> Self {
        Self { state, frame, time }
    }

    /// Frame number: 0 for the initial state, `i + 1` after step `i`.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time of this frame.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Grid topology.
    pub fn grid(&self) -> &'a Grid {
        self.state.grid()
    }

    /// Population A.
    pub fn c_a(&self) -> &'a Field {
        self.state.c_a()
    }

    /// Population B.
    pub fn c_b(&self) -> &'a Field {
        self.state.c_b()
    }

    /// Full underlying state.
    pub fn state(&self) -> &'a FieldState {
        self.state
    }

    /// `C_a - C_b`, the quantity a renderer colour-maps.
    pub fn difference(&self) -> Result<Field, FieldError> {
        self.c_a().difference(self.c_b())
    }

    /// Summary statistics for `C_a` and `C_b`.
    pub fn stats(&self) -> (FieldStats, FieldStats) {
        (self.c_a().stats(), self.c_b().stats())
    }
}

/// Consumer of frames produced by [`LockstepSim::run`](crate::LockstepSim::run).
///
/// Return [`ControlFlow::Break`] to stop the run early. Closures of the
/// form `FnMut(&FrameView<'_>) -> ControlFlow<()>` implement this trait.
pub trait FrameSink {
    /// Called once with the initial frame and once after every step.
    fn on_frame(&mut self, frame: &FrameView<'_>) -> ControlFlow<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(&FrameView<'_>) -> ControlFlow<()>,
{
    fn on_frame(&mut self, frame: &FrameView<'_>) -> ControlFlow<()> {
        self(frame)
    }
}
