//! Running the external tools.
//!
//! Provides the pieces between a resolved configuration and a finished run: the child
//! environment, the process invocation and runner seam, and the stage pipeline that
//! sequences tools and persists their output.

/// Child environment for the SystemC-based simulator.
pub mod environment;

/// Process invocations, outcomes, and the runner trait.
pub mod invocation;

/// Sequential stage execution with short-circuit on failure.
pub mod pipeline;

pub use environment::{EnvMap, RunEnvironment, caller_environment};
pub use invocation::{ProcessInvocation, ProcessRunner, SystemRunner, Tool, ToolOutcome};
pub use pipeline::{LogPolicy, Pipeline, Stage};
