//! Criterion benchmarks for whole-simulator stepping.

use std::hint::black_box;
use std::ops::ControlFlow;

use criterion::{criterion_group, criterion_main, Criterion};
use switchfield_bench::{reference_profile, stress_profile};
use switchfield_engine::{FrameView, LockstepSim};

fn bench_step_2500(c: &mut Criterion) {
    let mut sim = LockstepSim::new(reference_profile()).unwrap();

    // Warm up: one step so the first-touch cost is paid
    sim.step_sync().unwrap();

    c.bench_function("step_2500", |b| {
        b.iter(|| {
            let result = sim.step_sync().unwrap();
            black_box(&result.metrics);
        });
    });
}

fn bench_step_250k(c: &mut Criterion) {
    let mut sim = LockstepSim::new(stress_profile()).unwrap();
    sim.step_sync().unwrap();

    c.bench_function("step_250k", |b| {
        b.iter(|| {
            let result = sim.step_sync().unwrap();
            black_box(&result.metrics);
        });
    });
}

fn bench_reference_run(c: &mut Criterion) {
    c.bench_function("reference_run_1000", |b| {
        b.iter(|| {
            let mut sim = LockstepSim::new(reference_profile()).unwrap();
            let mut sink = |_: &FrameView<'_>| ControlFlow::Continue(());
            black_box(sim.run(&mut sink).unwrap());
        });
    });
}

criterion_group!(benches, bench_step_2500, bench_step_250k, bench_reference_run);
criterion_main!(benches);
