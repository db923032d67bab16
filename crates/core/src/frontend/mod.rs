//! Front ends.
//!
//! Two entry points share the same machinery:
//! 1. **Inner:** The general front end. Resolves every parameter, prepares the output
//!    directory and environment, then runs the simulator and the energy estimator.
//! 2. **Tri-core:** The fixed 3-core front end. Translates its reduced parameter surface into
//!    an invocation of the inner front end.

/// General front end.
pub mod inner;

/// Fixed 3-core front end.
pub mod tricore;

use crate::common::{Result, RunnerError};
use crate::config::ApplicationSource;

/// Rejects a modes-dependent mapping strategy when no modes-switching file was selected.
fn check_modes_requirement(requires_modes: bool, application: Option<&ApplicationSource>) -> Result<()> {
    if requires_modes && !application.is_some_and(ApplicationSource::is_modes) {
        return Err(RunnerError::invalid(
            "StaticModes mapping must be used with the modes file option (-mf)",
        ));
    }
    Ok(())
}
