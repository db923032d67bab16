//! Stage pipeline.
//!
//! Runs a fixed sequence of tool invocations, one at a time. Every stage:
//! 1. prints its command line when verbose,
//! 2. runs to completion through the [`ProcessRunner`],
//! 3. optionally echoes its standard output and persists it to a log file,
//! 4. stops the whole pipeline on a non-zero exit, after echoing standard error and the
//!    tool's failure notice.
//!
//! Later stages never start once an earlier one has failed.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::common::{Result, RunnerError};
use crate::sim::invocation::{ProcessInvocation, ProcessRunner, Tool, ToolOutcome};

/// When a stage's standard output is written to its log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogPolicy {
    /// Always, including when the tool failed.
    Always,
    /// Only after the tool succeeded.
    OnSuccess,
}

/// One step of a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct Stage {
    tool: Tool,
    invocation: ProcessInvocation,
    echo_stdout: bool,
    log: Option<(PathBuf, LogPolicy)>,
}

impl Stage {
    /// Stage running `invocation` as `tool`, with no echo and no log.
    pub fn new(tool: Tool, invocation: ProcessInvocation) -> Self {
        Self {
            tool,
            invocation,
            echo_stdout: false,
            log: None,
        }
    }

    /// Echo the captured standard output to the console.
    #[must_use]
    pub fn echo_stdout(mut self) -> Self {
        self.echo_stdout = true;
        self
    }

    /// Persist the captured standard output to `path` according to `policy`.
    #[must_use]
    pub fn log_to(mut self, path: impl Into<PathBuf>, policy: LogPolicy) -> Self {
        self.log = Some((path.into(), policy));
        self
    }

    /// Tool run by this stage.
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// Invocation run by this stage.
    pub const fn invocation(&self) -> &ProcessInvocation {
        &self.invocation
    }

    fn persist(&self, outcome: &ToolOutcome, succeeded: bool) -> Result<()> {
        match &self.log {
            Some((path, policy)) if succeeded || *policy == LogPolicy::Always => {
                fs::write(path, &outcome.stdout).map_err(|e| RunnerError::io(path, e))
            }
            _ => Ok(()),
        }
    }
}

/// Ordered stages sharing a runner and a console.
#[derive(Debug)]
pub struct Pipeline<'r, R: ProcessRunner + ?Sized> {
    runner: &'r R,
    verbose: bool,
    stages: Vec<Stage>,
}

impl<'r, R: ProcessRunner + ?Sized> Pipeline<'r, R> {
    /// Empty pipeline. With `verbose`, each command line is printed before it runs.
    pub const fn new(runner: &'r R, verbose: bool) -> Self {
        Self {
            runner,
            verbose,
            stages: Vec::new(),
        }
    }

    /// Appends a stage.
    #[must_use]
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Runs every stage in order, writing user-facing output to `console`.
    ///
    /// Returns the outcome of each stage when all of them succeeded.
    ///
    /// # Errors
    ///
    /// [`RunnerError::ToolFailure`] for the first stage that exits non-zero (its standard
    /// error and failure notice have already been written to `console`), or any spawn, log,
    /// or console error. A failed stage whose log cannot be written still echoes its standard
    /// error and failure notice before the log error is returned.
    pub fn run<W: Write + ?Sized>(&self, console: &mut W) -> Result<Vec<ToolOutcome>> {
        let mut outcomes = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            let invocation = stage.invocation();
            if self.verbose {
                writeln!(console, "{}", invocation.command_line()).map_err(RunnerError::Console)?;
            }

            tracing::info!(tool = %stage.tool(), "starting stage");
            let outcome = self.runner.run(invocation)?;
            let succeeded = outcome.succeeded();

            if stage.echo_stdout {
                console
                    .write_all(outcome.stdout.as_bytes())
                    .map_err(RunnerError::Console)?;
            }
            let persisted = stage.persist(&outcome, succeeded);

            if !succeeded {
                tracing::error!(tool = %stage.tool(), exit_code = ?outcome.exit_code, "stage failed");
                console
                    .write_all(outcome.stderr.as_bytes())
                    .and_then(|()| writeln!(console, "{}", stage.tool().failure_notice()))
                    .map_err(RunnerError::Console)?;
                persisted?;
                return Err(RunnerError::ToolFailure {
                    tool: stage.tool(),
                    exit_code: outcome.exit_code,
                    stderr: outcome.stderr,
                });
            }

            persisted?;
            tracing::info!(tool = %stage.tool(), "stage finished");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
