//! Integration test: non-finite detection and halt.
//!
//! With `nan_check` on, a step that produces NaN or infinity must not be
//! committed: the state stays at the previous step, the error names the
//! offending population and cell, and the simulator refuses to step until
//! it is reset.

use switchfield_engine::{state_hash, LockstepSim, SimConfig, StabilityPolicy, StepError};

/// Far beyond the diffusion stability limit: every step amplifies the
/// field by several orders of magnitude until it overflows.
fn exploding_config(nan_check: bool) -> SimConfig {
    let mut config = SimConfig {
        nx: 8,
        ny: 8,
        stability: StabilityPolicy::Ignore,
        nan_check,
        ..SimConfig::default()
    };
    config.params.dt = 1.0e6;
    config
}

#[test]
fn non_finite_step_is_rolled_back_and_halts() {
    let mut sim = LockstepSim::new(exploding_config(true)).unwrap();

    let mut failure = None;
    for _ in 0..1000 {
        let before = state_hash(sim.state());
        let step = sim.current_step();
        match sim.step_sync() {
            Ok(_) => {}
            Err(e) => {
                assert_eq!(state_hash(sim.state()), before, "failed step was committed");
                assert_eq!(sim.current_step(), step);
                failure = Some(e);
                break;
            }
        }
    }

    let err = failure.expect("unstable run never produced a non-finite value");
    assert!(matches!(err, StepError::NonFinite { .. }), "got {err:?}");
    assert!(sim.is_halted());
    assert!(sim.state().c_a().first_non_finite().is_none());
    assert!(sim.state().c_b().first_non_finite().is_none());
}

#[test]
fn halted_simulator_refuses_until_reset() {
    let mut sim = LockstepSim::new(exploding_config(true)).unwrap();
    while sim.step_sync().is_ok() {}
    assert!(sim.is_halted());

    assert_eq!(sim.step_sync().unwrap_err(), StepError::Halted);
    assert_eq!(sim.step(0).unwrap_err(), StepError::Halted);

    sim.reset();
    assert!(!sim.is_halted());
    assert!(sim.step_sync().is_ok());
}

#[test]
fn run_surfaces_non_finite_error() {
    let mut config = exploding_config(true);
    config.total_steps = 1000;
    let mut sim = LockstepSim::new(config).unwrap();
    let mut sink = |_: &switchfield_engine::FrameView<'_>| std::ops::ControlFlow::Continue(());
    assert!(matches!(sim.run(&mut sink), Err(StepError::NonFinite { .. })));
}

#[test]
fn without_check_non_finite_values_are_committed() {
    let mut sim = LockstepSim::new(exploding_config(false)).unwrap();
    let mut overflowed = false;
    for _ in 0..1000 {
        sim.step_sync().unwrap();
        if sim.state().c_a().first_non_finite().is_some() {
            overflowed = true;
            break;
        }
    }
    assert!(overflowed);
    assert!(!sim.is_halted());
}
