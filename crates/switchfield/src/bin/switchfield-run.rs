//! `switchfield-run [CONFIG.json] [REPORT_EVERY]`
//!
//! Runs a simulation headless and logs progress. Set `RUST_LOG=info` to
//! see the periodic frame reports.

use std::process::ExitCode;

use clap::Parser;
use switchfield::runner::{self, RunnerArgs};

fn main() -> ExitCode {
    env_logger::init();

    let args = RunnerArgs::parse();
    match runner::run(&args) {
        Ok(summary) => {
            println!(
                "steps={} t={} mass_a={:.6} mass_b={:.6} hash={:016x}",
                summary.steps, summary.final_time, summary.mass_a, summary.mass_b, summary.hash
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
