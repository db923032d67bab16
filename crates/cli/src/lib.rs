//! Command-line front ends for the crossbar many-core simulator.
//!
//! Two binaries share this library:
//! 1. **`simulate`:** The general front end. Runs `mcsim-ca-xbar` and then the energy estimator.
//! 2. **`simulate-tricore`:** The fixed 3-core front end. Forwards to `simulate` with a 3x2 grid.
//!
//! Diagnostics go through `tracing` on standard error (`RUST_LOG`, default `warn`); the tools'
//! own output and the failure notices go to standard output.

/// Clap definitions and legacy flag normalization.
pub mod args;

use std::error::Error as _;
use std::io::Write;
use std::process;

use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;
use xbarsim_core::common::constants::FAILURE_EXIT_STATUS;
use xbarsim_core::{Result, RunnerError};

/// Installs the stderr log subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Writes a failed run's error to `errors`.
///
/// Tool failures were already reported (standard error plus failure notice) by the pipeline,
/// so only the log record is emitted for them.
pub fn report_failure<W: Write + ?Sized>(err: &RunnerError, errors: &mut W) {
    tracing::error!(error = %err, "run failed");
    if matches!(err, RunnerError::ToolFailure { .. }) {
        return;
    }
    let _ = writeln!(errors, "error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(errors, "  caused by: {cause}");
        source = cause.source();
    }
}

/// Exits with the failure status if `result` is an error.
pub fn exit_on_error(result: Result<()>) {
    if let Err(err) = result {
        report_failure(&err, &mut std::io::stderr().lock());
        process::exit(err.exit_status());
    }
}

/// Exits after a command-line parse error.
///
/// Help and version requests exit successfully; every other error prints clap's message and
/// exits with the failure status.
pub fn exit_on_usage_error(err: &clap::Error) -> ! {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
        _ => {
            let _ = err.print();
            process::exit(FAILURE_EXIT_STATUS)
        }
    }
}
