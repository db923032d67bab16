//! Validators for compound command-line parameters.
//!
//! Both validators are plain functions over raw tokens, independent of the argument parser:
//! 1. **Mapping:** A strategy name plus the companion value (file or seed) it may require.
//! 2. **Frequency:** A magnitude followed by one of the `GHz`/`MHz`/`KHz`/`Hz` units.

/// Core frequency parsing and normalization.
pub mod frequency;

/// Mapping strategy validation and the 3-core translation table.
pub mod mapping;

pub use frequency::{FREQUENCY_UNITS, Frequency};
pub use mapping::{MappingCatalog, MappingStrategy, TriCoreMapping};
