//! Headless runner behind the `switchfield-run` binary.
//!
//! Usage: `switchfield-run [CONFIG.json] [REPORT_EVERY]`. The config file
//! holds a JSON [`SimConfig`] in which every key is optional.
//! [`RunnerArgs`] is a clap parser for that command line.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use switchfield_engine::{ConfigError, FrameSink, FrameView, LockstepSim, RunSummary, SimConfig, StepError};

/// Frames between progress reports when none is given.
pub const DEFAULT_REPORT_EVERY: u64 = 100;

// ── RunnerError ────────────────────────────────────────────────────

/// Everything that can stop the runner.
#[derive(Debug)]
pub enum RunnerError {
    /// The config file could not be read.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The config file is not valid JSON for a [`SimConfig`].
    Json(serde_json::Error),
    /// The config failed validation.
    Config(ConfigError),
    /// A step failed.
    Step(StepError),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Json(e) => write!(f, "parsing config: {e}"),
            Self::Config(e) => write!(f, "invalid config: {e}"),
            Self::Step(e) => write!(f, "step failed: {e}"),
        }
    }
}

impl Error for RunnerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Step(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ConfigError> for RunnerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StepError> for RunnerError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

// ── Arguments ──────────────────────────────────────────────────────

/// Parsed command line.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(
    name = "switchfield-run",
    version,
    about = "Run a two-population switching field simulation headless"
)]
pub struct RunnerArgs {
    /// JSON config to load; defaults apply when absent.
    #[arg(value_hint = ValueHint::FilePath)]
    pub config_path: Option<PathBuf>,
    /// Log frame statistics every this many frames.
    #[arg(
        default_value_t = DEFAULT_REPORT_EVERY,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub report_every: u64,
}

/// Parse a JSON config string.
pub fn parse_config(json: &str) -> Result<SimConfig, RunnerError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON config file.
pub fn load_config(path: &Path) -> Result<SimConfig, RunnerError> {
    let json = fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&json)
}

// ── Reporting sink ─────────────────────────────────────────────────

/// [`FrameSink`] that logs frame statistics at a fixed interval.
#[derive(Clone, Debug)]
pub struct LoggingSink {
    report_every: u64,
    reports: u64,
}

impl LoggingSink {
    /// Report on every frame whose index is a multiple of `report_every`.
    /// Zero is treated as one.
    pub fn new(report_every: u64) -> Self {
        Self {
            report_every: report_every.max(1),
            reports: 0,
        }
    }

    /// Number of frames reported so far.
    pub fn reports(&self) -> u64 {
        self.reports
    }
}

impl FrameSink for LoggingSink {
    fn on_frame(&mut self, frame: &FrameView<'_>) -> ControlFlow<()> {
        if frame.frame() % self.report_every == 0 {
            let (a, b) = frame.stats();
            log::info!(
                "frame {} t={:.3}: c_a [{:.4}, {:.4}] mass {:.4} | c_b [{:.4}, {:.4}] mass {:.4}",
                frame.frame(),
                frame.time(),
                a.min,
                a.max,
                a.total,
                b.min,
                b.max,
                b.total
            );
            self.reports += 1;
        }
        ControlFlow::Continue(())
    }
}

// ── Entry point ────────────────────────────────────────────────────

/// Build a simulator from `args` and run it to completion.
pub fn run(args: &RunnerArgs) -> Result<RunSummary, RunnerError> {
    let config = match &args.config_path {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            load_config(path)?
        }
        None => SimConfig::default(),
    };
    let mut sim = LockstepSim::new(config)?;
    let mut sink = LoggingSink::new(args.report_every);
    Ok(sim.run(&mut sink)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchfield_engine::{state_hash, FieldState, StabilityPolicy};

    #[test]
    fn parse_defaults() {
        let args = RunnerArgs::try_parse_from(["switchfield-run"]).unwrap();
        assert_eq!(args.config_path, None);
        assert_eq!(args.report_every, DEFAULT_REPORT_EVERY);
    }

    #[test]
    fn parse_path_and_interval() {
        let args = RunnerArgs::try_parse_from(["switchfield-run", "run.json", "25"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("run.json")));
        assert_eq!(args.report_every, 25);
    }

    #[test]
    fn parse_rejects_bad_interval() {
        for bad in ["0", "-3", "ten"] {
            assert!(RunnerArgs::try_parse_from(["switchfield-run", "run.json", bad]).is_err());
        }
        let err = RunnerArgs::try_parse_from(["switchfield-run", "run.json", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(RunnerArgs::try_parse_from(["switchfield-run", "a", "1", "b"]).is_err());
    }

    #[test]
    fn parse_path_only_keeps_default_interval() {
        let args = RunnerArgs::try_parse_from(["switchfield-run", "cfg/wide.json"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("cfg/wide.json")));
        assert_eq!(args.report_every, DEFAULT_REPORT_EVERY);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        RunnerArgs::command().debug_assert();
    }

    #[test]
    fn parse_config_partial() {
        let c = parse_config(r#"{ "nx": 10, "dt": 0.05, "stability": "ignore" }"#).unwrap();
        assert_eq!(c.nx, 10);
        assert_eq!(c.ny, 50);
        assert_eq!(c.params.dt, 0.05);
        assert_eq!(c.stability, StabilityPolicy::Ignore);
    }

    #[test]
    fn parse_config_rejects_garbage() {
        assert!(matches!(parse_config("{ nx: }"), Err(RunnerError::Json(_))));
        assert!(matches!(
            parse_config(r#"{ "stability": "sometimes" }"#),
            Err(RunnerError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/switchfield.json")).unwrap_err();
        assert!(matches!(err, RunnerError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn logging_sink_counts_reports() {
        let g = switchfield_core::Grid::new(2, 2, 1.0).unwrap();
        let s = FieldState::split_halves(g);
        let mut sink = LoggingSink::new(10);
        for frame in 0..=25 {
            let view = FrameView::new(&s, frame, 0.0);
            assert!(sink.on_frame(&view).is_continue());
        }
        // frames 0, 10, 20
        assert_eq!(sink.reports(), 3);
    }

    #[test]
    fn run_with_defaults_matches_direct_run() {
        let summary = run(&RunnerArgs {
            config_path: None,
            report_every: 500,
        })
        .unwrap();
        assert_eq!(summary.steps, 1000);

        let mut sim = LockstepSim::new(SimConfig::default()).unwrap();
        for _ in 0..1000 {
            sim.step_sync().unwrap();
        }
        assert_eq!(summary.hash, state_hash(sim.state()));
    }
}
