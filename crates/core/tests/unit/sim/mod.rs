//! # Execution


/// Invocation building and tool outcomes.
pub mod invocation;
