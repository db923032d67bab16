//! # Parameter Validation


/// Mapping strategy catalogs and token validation.
pub mod mapping;
