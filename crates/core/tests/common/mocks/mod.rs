//! # Mocks

/// Runners standing in for real process execution.
pub mod runner;
