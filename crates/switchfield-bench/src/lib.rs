//! Benchmark profiles for the switchfield simulator.
//!
//! - [`reference_profile`]: the 50x50 reference configuration
//! - [`stress_profile`]: 500x500 grid (250K cells) for stress testing

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use switchfield_engine::{SimConfig, StabilityPolicy};

/// The reference configuration: 50x50 grid, default parameters, 1000
/// steps.
pub fn reference_profile() -> SimConfig {
    SimConfig {
        stability: StabilityPolicy::Reject,
        ..SimConfig::default()
    }
}

/// Same parameters as [`reference_profile`] on a 500x500 grid.
pub fn stress_profile() -> SimConfig {
    SimConfig {
        nx: 500,
        ny: 500,
        total_steps: 100,
        ..reference_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile().validate().is_ok());
        assert!(stress_profile().validate().is_ok());
    }

    #[test]
    fn stress_is_larger() {
        let grid = stress_profile().grid().unwrap();
        assert_eq!(grid.cell_count(), 250_000);
    }
}
