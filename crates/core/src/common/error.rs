//! Front-end error definitions.
//!
//! Every failure the front ends can hit is fatal to the run. The variants group into:
//! 1. **Argument errors:** Rejected before any process is launched.
//! 2. **Configuration errors:** Missing or unreadable environment, also raised before launch.
//! 3. **Tool failures:** An external process exited unsuccessfully; later stages are skipped.
//! 4. **I/O errors:** Spawning a process, writing a log, or writing console output failed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::constants::FAILURE_EXIT_STATUS;
use crate::sim::invocation::Tool;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Unified error type for the front ends.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A user-supplied parameter is malformed, unknown, or conflicts with another one.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller's environment does not allow the simulator to run.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An external tool exited with a non-zero status (or was killed).
    #[error("{tool} exited with {}", describe_exit(.exit_code))]
    ToolFailure {
        /// Which tool failed.
        tool: Tool,
        /// Exit code, or `None` if the process was terminated by a signal.
        exit_code: Option<i32>,
        /// Captured standard error of the tool.
        stderr: String,
    },

    /// An external tool could not be started at all.
    #[error("failed to launch {}: {source}", .program.display())]
    Spawn {
        /// Program that was being launched.
        program: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A filesystem operation on `path` failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read, written, or created.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A defaults override file is not valid JSON for the defaults table.
    #[error("invalid defaults file {}: {source}", .path.display())]
    DefaultsFile {
        /// Path of the override file.
        path: PathBuf,
        /// Deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing user-facing output failed.
    #[error("failed to write console output: {0}")]
    Console(#[source] io::Error),
}

impl RunnerError {
    /// Creates an [`RunnerError::InvalidArgument`] from a message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a [`RunnerError::Configuration`] from a message.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Wraps an I/O error with the path it concerns.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors raised before any external process was started.
    pub const fn is_pre_launch(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::Configuration(_) | Self::DefaultsFile { .. }
        )
    }

    /// Process exit status for this error. Every failure maps to the same status.
    pub const fn exit_status(&self) -> i32 {
        FAILURE_EXIT_STATUS
    }
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit status (terminated by signal)".to_owned(),
        |c| format!("status {c}"),
    )
}
