//! Process invocation and the runner seam.
//!
//! A [`ProcessInvocation`] is a program, its ordered arguments, and optionally an explicit
//! environment. It is built once per stage and executed once through a [`ProcessRunner`],
//! yielding a [`ToolOutcome`]. [`SystemRunner`] spawns real processes; tests substitute their
//! own runner.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::common::{Result, RunnerError};
use crate::sim::environment::RunEnvironment;

/// External tools the front ends drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Cycle-accurate crossbar simulator.
    Simulator,
    /// Energy estimator run over the simulator's output.
    EnergyEstimator,
    /// General front end, driven by the 3-core front end.
    InnerFrontEnd,
}

impl Tool {
    /// Line printed after the tool's standard error when it fails.
    pub const fn failure_notice(self) -> &'static str {
        match self {
            Self::Simulator | Self::InnerFrontEnd => "simulation FAILED",
            Self::EnergyEstimator => "Energy estimation FAILED",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simulator => "simulator",
            Self::EnergyEstimator => "energy estimator",
            Self::InnerFrontEnd => "simulation front end",
        })
    }
}

/// One execution of an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvocation {
    program: PathBuf,
    args: Vec<OsString>,
    environment: Option<RunEnvironment>,
}

impl ProcessInvocation {
    /// Invocation of `program` with no arguments, inheriting the caller's environment.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            environment: None,
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the program with exactly `environment` instead of the inherited one.
    #[must_use]
    pub fn with_environment(mut self, environment: RunEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, excluding the program.
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as strings (lossy), convenient for display and comparisons.
    pub fn arguments_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Explicit environment, or `None` when the caller's is inherited.
    pub const fn environment(&self) -> Option<&RunEnvironment> {
        self.environment.as_ref()
    }

    /// Program and arguments joined with spaces.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.arguments_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Standard library command for this invocation.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        let _ = command.args(&self.args);
        if let Some(env) = &self.environment {
            let _ = command.env_clear().envs(env.vars());
        }
        command
    }
}

impl fmt::Display for ProcessInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// What a finished process left behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutcome {
    /// Exit code; `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ToolOutcome {
    /// Outcome of a process that exited with status 0.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Outcome of a process that exited with `code`.
    pub fn failure(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// True for exit status 0.
    pub const fn succeeded(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Executes invocations. Each call blocks until the process exits.
pub trait ProcessRunner {
    /// Runs `invocation` to completion, capturing both output streams in full.
    ///
    /// # Errors
    ///
    /// [`RunnerError::Spawn`] if the process could not be started. A non-zero exit is not an
    /// error at this level; it is reported in the returned [`ToolOutcome`].
    fn run(&self, invocation: &ProcessInvocation) -> Result<ToolOutcome>;
}

/// Runner spawning real operating-system processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &ProcessInvocation) -> Result<ToolOutcome> {
        tracing::debug!(command = %invocation, "spawning");
        let output = invocation
            .to_command()
            .output()
            .map_err(|source| RunnerError::Spawn {
                program: invocation.program().to_path_buf(),
                source,
            })?;
        Ok(ToolOutcome {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
