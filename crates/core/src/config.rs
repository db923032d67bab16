//! Configuration for the simulator front ends.
//!
//! This module defines the values every run starts from. It provides:
//! 1. **Defaults:** One immutable [`DefaultsConfig`] table per front end, optionally
//!    overridden from a JSON file.
//! 2. **Enums:** Closed choice sets for scheduling, crossbar arbitration, and the bundled
//!    applications.
//! 3. **Layout:** Where the external tools, bundled applications, and default output live.
//!
//! Nothing here reads global state implicitly: defaults are passed into the resolvers and the
//! install root is located from an explicit environment map.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    ESTIMATOR_BINARY, ESTIMATOR_RESOURCES, INSTALL_ROOT, OUTPUT_DIR_NAME, SIMULATOR_BINARY,
};
use crate::common::{Result, RunnerError};
use crate::params::{Frequency, MappingStrategy};
use crate::sim::environment::EnvMap;

/// Default parameter values for the front ends.
mod defaults {
    /// Grid rows of the general platform.
    pub const ROWS: u32 = 4;

    /// Grid columns of the general platform.
    pub const COLS: u32 = 4;

    /// Rows of the 3-core platform.
    pub const TRICORE_ROWS: u32 = 3;

    /// Columns of the 3-core platform.
    pub const TRICORE_COLS: u32 = 2;

    /// Application iterations.
    pub const ITERATIONS: u32 = 1;

    /// Crossbar FIFO depth on the general platform.
    pub const XBAR_FIFO_SIZE: u32 = 16;

    /// Crossbar FIFO depth on the 3-core platform.
    pub const TRICORE_XBAR_FIFO_SIZE: u32 = 2;

    /// Latency, in cycles, of every crossbar access direction.
    pub const XBAR_LATENCY: u32 = 2;
}

/// Policy cores use to pick the next runnable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulingStrategy {
    /// First come, first served.
    #[default]
    #[serde(rename = "fcfs")]
    FirstComeFirstServed,
    /// Highest priority first.
    #[serde(rename = "prio")]
    Priority,
}

impl SchedulingStrategy {
    /// Accepted spellings.
    pub const NAMES: [&'static str; 2] = ["fcfs", "prio"];

    /// Spelling used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstComeFirstServed => "fcfs",
            Self::Priority => "prio",
        }
    }
}

impl FromStr for SchedulingStrategy {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fcfs" => Ok(Self::FirstComeFirstServed),
            "prio" => Ok(Self::Priority),
            _ => Err(invalid_choice("scheduling strategy", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for SchedulingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crossbar arbitration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XbarPolicy {
    /// Fully connected, no arbitration stalls.
    #[default]
    Full,
    /// Round-robin arbitration between requesters.
    RoundRobin,
    /// Fixed-priority arbitration.
    Priority,
}

impl XbarPolicy {
    /// Accepted spellings.
    pub const NAMES: [&'static str; 3] = ["Full", "RoundRobin", "Priority"];

    /// Spelling used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::RoundRobin => "RoundRobin",
            Self::Priority => "Priority",
        }
    }
}

impl FromStr for XbarPolicy {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Full" => Ok(Self::Full),
            "RoundRobin" => Ok(Self::RoundRobin),
            "Priority" => Ok(Self::Priority),
            _ => Err(invalid_choice("crossbar policy", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for XbarPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applications shipped with the simulator under `<root>/apps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefaultApplication {
    /// Demo car power-up scenario.
    #[default]
    #[serde(rename = "DC")]
    DemoCar,
    /// Control system engine.
    #[serde(rename = "CSE")]
    ControlSystemEngine,
}

impl DefaultApplication {
    /// Accepted short names.
    pub const NAMES: [&'static str; 2] = ["DC", "CSE"];

    /// Short name used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DemoCar => "DC",
            Self::ControlSystemEngine => "CSE",
        }
    }

    /// Application file, relative to the install root.
    pub const fn relative_path(self) -> &'static str {
        match self {
            Self::DemoCar => "apps/DEMO_CAR/DemoCar-PowerUp.amxmi",
            Self::ControlSystemEngine => "apps/CONTROL_SYSTEM_ENGINE.amxmi",
        }
    }
}

impl FromStr for DefaultApplication {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DC" => Ok(Self::DemoCar),
            "CSE" => Ok(Self::ControlSystemEngine),
            _ => Err(invalid_choice("application", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for DefaultApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the simulated application comes from. The three choices are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationSource {
    /// One of the bundled applications.
    Named(DefaultApplication),
    /// A user-supplied `.amxmi` file.
    Custom(PathBuf),
    /// A modes-switching file describing a sequence of operating modes.
    Modes(PathBuf),
}

impl ApplicationSource {
    /// True for a modes-switching file.
    pub const fn is_modes(&self) -> bool {
        matches!(self, Self::Modes(_))
    }
}

impl Default for ApplicationSource {
    fn default() -> Self {
        Self::Named(DefaultApplication::default())
    }
}

/// Crossbar interconnect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossbarConfig {
    /// Arbitration policy.
    pub policy: XbarPolicy,
    /// Depth of each crossbar FIFO. Always positive.
    pub fifo_size: u32,
    /// Cycles for a read from the local memory.
    pub local_read_latency: u32,
    /// Cycles for a write to the local memory.
    pub local_write_latency: u32,
    /// Cycles for a read from a remote memory.
    pub remote_read_latency: u32,
    /// Cycles for a write to a remote memory.
    pub remote_write_latency: u32,
}

impl CrossbarConfig {
    const fn with_fifo_size(fifo_size: u32) -> Self {
        Self {
            policy: XbarPolicy::Full,
            fifo_size,
            local_read_latency: defaults::XBAR_LATENCY,
            local_write_latency: defaults::XBAR_LATENCY,
            remote_read_latency: defaults::XBAR_LATENCY,
            remote_write_latency: defaults::XBAR_LATENCY,
        }
    }
}

impl Default for CrossbarConfig {
    fn default() -> Self {
        Self::with_fifo_size(defaults::XBAR_FIFO_SIZE)
    }
}

/// Grid shape and number of application iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Number of times the application is executed.
    pub iterations: u32,
}

impl Topology {
    /// The fixed 3-core platform. Not configurable from the 3-core front end.
    pub const TRICORE: Self = Self {
        rows: defaults::TRICORE_ROWS,
        cols: defaults::TRICORE_COLS,
        iterations: defaults::ITERATIONS,
    };
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            rows: defaults::ROWS,
            cols: defaults::COLS,
            iterations: defaults::ITERATIONS,
        }
    }
}

/// Values used for every parameter the user leaves unset.
///
/// Each front end has its own table; resolvers receive it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Grid shape and iterations.
    pub topology: Topology,
    /// Core frequency.
    pub frequency: Frequency,
    /// Scheduling policy.
    pub scheduling: SchedulingStrategy,
    /// Mapping strategy.
    pub mapping: MappingStrategy,
    /// Application used when no source is selected.
    pub application: DefaultApplication,
    /// Crossbar parameters.
    pub crossbar: CrossbarConfig,
    /// Output directory; `None` means `<root>/OUTPUT_FILES`.
    pub output_dir: Option<PathBuf>,
}

impl DefaultsConfig {
    /// Table of the general front end.
    pub fn inner() -> Self {
        Self {
            topology: Topology::default(),
            frequency: Frequency::default(),
            scheduling: SchedulingStrategy::default(),
            mapping: MappingStrategy::default(),
            application: DefaultApplication::default(),
            crossbar: CrossbarConfig::default(),
            output_dir: None,
        }
    }

    /// Table of the 3-core front end.
    pub fn tricore() -> Self {
        Self {
            topology: Topology::TRICORE,
            crossbar: CrossbarConfig::with_fifo_size(defaults::TRICORE_XBAR_FIFO_SIZE),
            ..Self::inner()
        }
    }

    /// Applies a JSON override file on top of `self`.
    ///
    /// The file holds a JSON object with any subset of the keys of [`DefaultsOverride`];
    /// missing keys keep the value from `self`.
    pub fn with_overrides_from(self, path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| RunnerError::io(path, e))?;
        let overrides: DefaultsOverride =
            serde_json::from_str(&text).map_err(|source| RunnerError::DefaultsFile {
                path: path.to_path_buf(),
                source,
            })?;
        let merged = overrides.apply(self);
        tracing::debug!(file = %path.display(), defaults = ?merged, "applied defaults override");
        Ok(merged)
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self::inner()
    }
}

/// Partial defaults table as read from a JSON override file.
///
/// ```
/// use xbarsim_core::config::{DefaultsConfig, DefaultsOverride};
///
/// let json = r#"{ "rows": 8, "frequency": "400MHz", "xbar_policy": "RoundRobin" }"#;
/// let overrides: DefaultsOverride = serde_json::from_str(json).unwrap();
/// let defaults = overrides.apply(DefaultsConfig::inner());
/// assert_eq!(defaults.topology.rows, 8);
/// assert_eq!(defaults.frequency.hertz(), 400_000_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsOverride {
    /// Grid rows.
    pub rows: Option<u32>,
    /// Grid columns.
    pub cols: Option<u32>,
    /// Application iterations.
    pub iterations: Option<u32>,
    /// Core frequency, e.g. `"400MHz"`.
    pub frequency: Option<Frequency>,
    /// `"fcfs"` or `"prio"`.
    pub scheduling: Option<SchedulingStrategy>,
    /// `"DC"` or `"CSE"`.
    pub application: Option<DefaultApplication>,
    /// Crossbar policy.
    pub xbar_policy: Option<XbarPolicy>,
    /// Crossbar FIFO depth.
    pub xbar_fifo_size: Option<u32>,
    /// Local read latency.
    pub xbar_local_read_latency: Option<u32>,
    /// Local write latency.
    pub xbar_local_write_latency: Option<u32>,
    /// Remote read latency.
    pub xbar_remote_read_latency: Option<u32>,
    /// Remote write latency.
    pub xbar_remote_write_latency: Option<u32>,
    /// Output directory.
    pub output_dir: Option<PathBuf>,
}

impl DefaultsOverride {
    /// Overlays every present field onto `base`.
    pub fn apply(self, base: DefaultsConfig) -> DefaultsConfig {
        let xbar = base.crossbar;
        DefaultsConfig {
            topology: Topology {
                rows: self.rows.unwrap_or(base.topology.rows),
                cols: self.cols.unwrap_or(base.topology.cols),
                iterations: self.iterations.unwrap_or(base.topology.iterations),
            },
            frequency: self.frequency.unwrap_or(base.frequency),
            scheduling: self.scheduling.unwrap_or(base.scheduling),
            mapping: base.mapping,
            application: self.application.unwrap_or(base.application),
            crossbar: CrossbarConfig {
                policy: self.xbar_policy.unwrap_or(xbar.policy),
                fifo_size: self.xbar_fifo_size.unwrap_or(xbar.fifo_size),
                local_read_latency: self
                    .xbar_local_read_latency
                    .unwrap_or(xbar.local_read_latency),
                local_write_latency: self
                    .xbar_local_write_latency
                    .unwrap_or(xbar.local_write_latency),
                remote_read_latency: self
                    .xbar_remote_read_latency
                    .unwrap_or(xbar.remote_read_latency),
                remote_write_latency: self
                    .xbar_remote_write_latency
                    .unwrap_or(xbar.remote_write_latency),
            },
            output_dir: self.output_dir.or(base.output_dir),
        }
    }
}

/// Install tree of the simulator.
///
/// ```text
/// <root>/apps/...                  bundled applications
/// <root>/obj/mcsim-ca-xbar         cycle-accurate simulator
/// <root>/obj/energy_estimator      energy estimator
/// <root>/src/energy_estimator/     estimator resources
/// <root>/OUTPUT_FILES              default output directory
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locates the install root: `XBARSIM_ROOT` from `env` if set and non-empty, otherwise
    /// the directory holding the running executable.
    pub fn locate(env: &EnvMap) -> Result<Self> {
        if let Some(root) = env
            .get(OsStr::new(INSTALL_ROOT))
            .filter(|value| !value.is_empty())
        {
            return Ok(Self::new(root));
        }
        let exe = std::env::current_exe().map_err(|e| {
            RunnerError::configuration(format!(
                "cannot locate the running executable ({e}); set {INSTALL_ROOT}"
            ))
        })?;
        let dir = exe.parent().ok_or_else(|| {
            RunnerError::configuration(format!(
                "executable {} has no parent directory; set {INSTALL_ROOT}",
                exe.display()
            ))
        })?;
        Ok(Self::new(dir))
    }

    /// Install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cycle-accurate simulator binary.
    pub fn simulator(&self) -> PathBuf {
        self.root.join(SIMULATOR_BINARY)
    }

    /// Energy estimator binary.
    pub fn estimator(&self) -> PathBuf {
        self.root.join(ESTIMATOR_BINARY)
    }

    /// Resource directory passed to the energy estimator.
    pub fn estimator_resources(&self) -> PathBuf {
        self.root.join(ESTIMATOR_RESOURCES)
    }

    /// Output directory used when neither the user nor the defaults table names one.
    pub fn default_output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR_NAME)
    }

    /// File of a bundled application.
    pub fn application_file(&self, app: DefaultApplication) -> PathBuf {
        self.root.join(app.relative_path())
    }
}

fn invalid_choice(what: &str, value: &str, choices: &[&str]) -> RunnerError {
    RunnerError::invalid(format!(
        "invalid {what} {value:?} (choose from {choices:?})"
    ))
}
