//! Environment Resolver.
//!
//! The simulator links against the SystemC runtime (and optionally Xerces-C) at load time, so
//! its environment must carry the right library search path. This module derives that
//! environment from a copy of the caller's variables:
//! 1. **Runtime home:** `SYSTEMC_HOME` is required; the first `lib-*` entry below it is
//!    appended to `LD_LIBRARY_PATH`.
//! 2. **Banner:** `SC_COPYRIGHT_MESSAGE=DISABLE` is always set.
//! 3. **Xerces:** when `XERCES_HOME` is set, `<XERCES_HOME>/lib` is appended as well.
//!
//! [`RunEnvironment::resolve`] is pure; only [`RunEnvironment::from_caller`] touches the
//! filesystem (to list the runtime home).

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::{
    COPYRIGHT_BANNER, COPYRIGHT_BANNER_DISABLED, LIBRARY_PATH, LIBRARY_PATH_SEPARATOR,
    SYSTEMC_HOME, SYSTEMC_LIB_MARKER, XERCES_HOME, XERCES_LIB_DIR,
};
use crate::common::{Result, RunnerError};

/// Environment variables, ordered by name.
pub type EnvMap = BTreeMap<OsString, OsString>;

/// Snapshot of the current process environment.
pub fn caller_environment() -> EnvMap {
    std::env::vars_os().collect()
}

/// Environment handed to the simulator process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEnvironment {
    vars: EnvMap,
}

impl RunEnvironment {
    /// Derives the run environment from `caller`, listing the runtime home on disk.
    ///
    /// # Errors
    ///
    /// [`RunnerError::Configuration`] if `SYSTEMC_HOME` is unset, empty, or not a readable
    /// directory.
    pub fn from_caller(caller: &EnvMap) -> Result<Self> {
        let home = runtime_home(caller)?;
        let entries = list_runtime_home(&home)?;
        Self::resolve(caller, &entries)
    }

    /// Derives the run environment from `caller` and the names found in the runtime home.
    ///
    /// `caller` is copied, never modified. The first name in `home_entries` containing
    /// `lib-` is used; if there is none the search path is left alone.
    ///
    /// # Errors
    ///
    /// [`RunnerError::Configuration`] if `SYSTEMC_HOME` is unset or empty.
    pub fn resolve(caller: &EnvMap, home_entries: &[OsString]) -> Result<Self> {
        let home = runtime_home(caller)?;
        let mut vars = caller.clone();

        let lib_dir = home_entries
            .iter()
            .find(|entry| entry.to_string_lossy().contains(SYSTEMC_LIB_MARKER));
        match lib_dir {
            Some(entry) => append_library_path(&mut vars, &home.join(entry)),
            None => tracing::warn!(
                home = %home.display(),
                "no {SYSTEMC_LIB_MARKER}* directory in {SYSTEMC_HOME}; library path left unchanged"
            ),
        }

        let _ = vars.insert(
            OsString::from(COPYRIGHT_BANNER),
            OsString::from(COPYRIGHT_BANNER_DISABLED),
        );

        if let Some(xerces) = non_empty(caller, XERCES_HOME) {
            append_library_path(&mut vars, &Path::new(xerces).join(XERCES_LIB_DIR));
        }

        tracing::debug!(
            library_path = ?vars.get(OsStr::new(LIBRARY_PATH)),
            "resolved run environment"
        );
        Ok(Self { vars })
    }

    /// All variables.
    pub const fn vars(&self) -> &EnvMap {
        &self.vars
    }

    /// Value of a single variable.
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// The resulting `LD_LIBRARY_PATH`, if any.
    pub fn library_path(&self) -> Option<&OsStr> {
        self.get(LIBRARY_PATH)
    }
}

/// `SYSTEMC_HOME` from `env`.
///
/// # Errors
///
/// [`RunnerError::Configuration`] if the variable is unset or empty.
pub fn runtime_home(env: &EnvMap) -> Result<PathBuf> {
    non_empty(env, SYSTEMC_HOME).map(PathBuf::from).ok_or_else(|| {
        RunnerError::configuration(format!(
            "You must define the {SYSTEMC_HOME} variable to use this front end"
        ))
    })
}

/// Names of the immediate entries of `home`, sorted so the `lib-*` pick is deterministic.
pub fn list_runtime_home(home: &Path) -> Result<Vec<OsString>> {
    let unreadable = |e: std::io::Error| {
        RunnerError::configuration(format!(
            "{SYSTEMC_HOME} ({}) cannot be listed: {e}",
            home.display()
        ))
    };
    let mut names = fs::read_dir(home)
        .map_err(unreadable)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(unreadable)?;
    names.sort();
    Ok(names)
}

fn non_empty<'a>(env: &'a EnvMap, key: &str) -> Option<&'a OsStr> {
    env.get(OsStr::new(key))
        .map(OsString::as_os_str)
        .filter(|value| !value.is_empty())
}

fn append_library_path(vars: &mut EnvMap, dir: &Path) {
    let key = OsString::from(LIBRARY_PATH);
    let mut value = vars.remove(&key).unwrap_or_default();
    if !value.is_empty() {
        value.push(LIBRARY_PATH_SEPARATOR);
    }
    value.push(dir.as_os_str());
    let _ = vars.insert(key, value);
}
