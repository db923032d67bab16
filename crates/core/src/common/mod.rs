//! Common types shared by every layer of the front end.
//!
//! This module provides:
//! 1. **Constants:** Environment variable names, install-relative paths, and log file names.
//! 2. **Error Handling:** The crate error enum and its `Result` alias.

/// Environment keys, install-relative paths, and artifact names.
pub mod constants;

/// Error type and result alias.
pub mod error;

pub use error::{Result, RunnerError};
