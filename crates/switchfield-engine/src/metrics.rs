//! Per-step timing and conservation metrics.
//!
//! [`StepMetrics`] is filled by [`LockstepSim`](crate::LockstepSim) after
//! every committed step and can be read back through
//! [`last_metrics()`](crate::LockstepSim::last_metrics).

/// Metrics collected during a single step.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step, in microseconds.
    pub total_us: u64,
    /// Per-term accumulation times: `(name, microseconds)`, in pipeline
    /// order.
    pub term_us: Vec<(String, u64)>,
    /// Sum of `C_a` over all cells after the step.
    pub mass_a: f64,
    /// Sum of `C_b` over all cells after the step.
    pub mass_b: f64,
}

impl StepMetrics {
    /// Combined mass of both populations.
    pub fn total_mass(&self) -> f64 {
        self.mass_a + self.mass_b
    }
}
