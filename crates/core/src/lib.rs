//! Crossbar simulator front-end library.
//!
//! This crate holds everything between the command line and the external simulation tools:
//! 1. **Parameters:** Validation of mapping strategies and core frequencies.
//! 2. **Configuration:** Per-front-end default tables, install layout, and the resolved run config.
//! 3. **Environment:** Construction of the child environment the SystemC runtime needs.
//! 4. **Execution:** Process invocations, the runner seam, and the two-stage pipeline.
//! 5. **Front ends:** The general front end and the fixed 3-core front end that drives it.

/// Common types and constants (errors, environment keys, file names).
pub mod common;
/// Default tables, enums for closed choice sets, and install layout.
pub mod config;
/// Front ends: parameter resolution and command translation.
pub mod frontend;
/// Validators for compound parameters (mapping strategy, frequency).
pub mod params;
/// Environment resolution, process invocation, and stage sequencing.
pub mod sim;

/// Crate-wide error type; every fallible operation returns it.
pub use crate::common::{Result, RunnerError};
/// Default parameter table; use `DefaultsConfig::inner()` or `DefaultsConfig::tricore()`.
pub use crate::config::DefaultsConfig;
/// Resolved parameter set for one simulator run.
pub use crate::frontend::inner::SimulationConfig;
/// Validated mapping strategy and core frequency.
pub use crate::params::{Frequency, MappingStrategy};
