//! Mapping strategy parameter.
//!
//! A mapping strategy decides how runnables are placed on simulated cores. On the command
//! line it is written as one or two tokens: the strategy name, then a companion value when
//! the strategy needs one.
//!
//! | Name            | Companion    |
//! |-----------------|--------------|
//! | `ZigZag`        | none         |
//! | `MinComm`       | none         |
//! | `3Core`         | none         |
//! | `Static`        | mapping file |
//! | `StaticTriCore` | mapping file |
//! | `StaticModes`   | mapping file |
//! | `Randomfixed`   | seed         |
//!
//! Which names are accepted depends on the front end, see [`MappingCatalog`].

use std::fmt;

use crate::common::{Result, RunnerError};

/// Set of strategy names a front end accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingCatalog {
    /// Fixed 3-core front end.
    TriCore,
    /// General front end.
    Inner,
}

impl MappingCatalog {
    /// Accepted names, in the order they are listed in help and error messages.
    pub const fn names(self) -> &'static [&'static str] {
        match self {
            Self::TriCore => &["ZigZag", "Static", "StaticModes"],
            Self::Inner => &[
                "MinComm",
                "Static",
                "StaticTriCore",
                "ZigZag",
                "3Core",
                "StaticModes",
                "Randomfixed",
            ],
        }
    }

    /// Returns true if `name` belongs to this catalog.
    pub fn contains(self, name: &str) -> bool {
        self.names().contains(&name)
    }
}

/// A validated mapping strategy with its companion value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MappingStrategy {
    /// Zig-zag placement over the grid.
    #[default]
    ZigZag,
    /// Communication-minimizing placement.
    MinComm,
    /// Fixed placement for the 3-core platform.
    ThreeCore,
    /// Placement read from a mapping file.
    Static {
        /// Mapping file, passed through verbatim.
        file: String,
    },
    /// Placement read from a mapping file, 3-core flavour.
    StaticTriCore {
        /// Mapping file, passed through verbatim.
        file: String,
    },
    /// Placement read from a mapping file, per operating mode.
    /// Only valid together with a modes-switching application.
    StaticModes {
        /// Mapping file, passed through verbatim.
        file: String,
    },
    /// Random placement with a fixed seed.
    RandomFixed {
        /// Seed, passed through verbatim.
        seed: String,
    },
}

impl MappingStrategy {
    /// Validates 1-2 raw tokens against `catalog`.
    ///
    /// `tokens[0]` is the strategy name. Names starting with `Static` need a mapping file as
    /// `tokens[1]`, `Randomfixed` needs a seed there, and every other name takes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidArgument`] for an empty token list, a name outside the
    /// catalog, a missing companion, or a companion given to a strategy that takes none.
    pub fn from_tokens<S: AsRef<str>>(catalog: MappingCatalog, tokens: &[S]) -> Result<Self> {
        let (name, rest) = match tokens {
            [] => return Err(RunnerError::invalid("mapping strategy requires a name")),
            [name, rest @ ..] => (name.as_ref(), rest),
        };
        if !catalog.contains(name) {
            return Err(RunnerError::invalid(format!(
                "invalid mapping {name:?}; valid strategies are {:?}",
                catalog.names()
            )));
        }

        let companion = match rest {
            [] => None,
            [value] => Some(value.as_ref().to_owned()),
            _ => {
                return Err(RunnerError::invalid(format!(
                    "{name:?} mapping accepts at most one option"
                )));
            }
        };

        if name.starts_with("Static") {
            let file = companion.ok_or_else(|| {
                RunnerError::invalid(format!("{name:?} mapping requires a file option"))
            })?;
            return Ok(match name {
                "Static" => Self::Static { file },
                "StaticTriCore" => Self::StaticTriCore { file },
                _ => Self::StaticModes { file },
            });
        }

        if name == "Randomfixed" {
            let seed = companion.ok_or_else(|| {
                RunnerError::invalid(format!("{name:?} mapping requires a seed option"))
            })?;
            return Ok(Self::RandomFixed { seed });
        }

        if companion.is_some() {
            return Err(RunnerError::invalid(format!(
                "{name:?} mapping does not take an option"
            )));
        }
        Ok(match name {
            "MinComm" => Self::MinComm,
            "3Core" => Self::ThreeCore,
            _ => Self::ZigZag,
        })
    }

    /// Name as understood by the simulator.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ZigZag => "ZigZag",
            Self::MinComm => "MinComm",
            Self::ThreeCore => "3Core",
            Self::Static { .. } => "Static",
            Self::StaticTriCore { .. } => "StaticTriCore",
            Self::StaticModes { .. } => "StaticModes",
            Self::RandomFixed { .. } => "Randomfixed",
        }
    }

    /// Mapping file for the `Static*` strategies.
    pub fn mapping_file(&self) -> Option<&str> {
        match self {
            Self::Static { file } | Self::StaticTriCore { file } | Self::StaticModes { file } => {
                Some(file)
            }
            _ => None,
        }
    }

    /// Seed for `Randomfixed`.
    pub fn seed(&self) -> Option<&str> {
        match self {
            Self::RandomFixed { seed } => Some(seed),
            _ => None,
        }
    }

    /// True when the strategy only makes sense with a modes-switching application.
    pub const fn requires_modes_file(&self) -> bool {
        matches!(self, Self::StaticModes { .. })
    }

    /// Command-line tokens: the name followed by the companion, if any.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = vec![self.name()];
        tokens.extend(self.mapping_file());
        tokens.extend(self.seed());
        tokens
    }
}

impl fmt::Display for MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

/// Mapping strategies exposed by the 3-core front end.
///
/// Each one has exactly one counterpart understood by the general front end, see
/// [`TriCoreMapping::to_inner`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TriCoreMapping {
    /// Default placement; becomes `3Core`.
    #[default]
    ZigZag,
    /// File-driven placement; becomes `StaticTriCore` with the same file.
    Static {
        /// Mapping file.
        file: String,
    },
    /// File-driven per-mode placement; stays `StaticModes` with the same file.
    StaticModes {
        /// Mapping file.
        file: String,
    },
}

impl TriCoreMapping {
    /// Validates 1-2 raw tokens against the 3-core catalog.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MappingStrategy::from_tokens`] with [`MappingCatalog::TriCore`].
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        match MappingStrategy::from_tokens(MappingCatalog::TriCore, tokens)? {
            MappingStrategy::ZigZag => Ok(Self::ZigZag),
            MappingStrategy::Static { file } => Ok(Self::Static { file }),
            MappingStrategy::StaticModes { file } => Ok(Self::StaticModes { file }),
            other => Err(RunnerError::invalid(format!(
                "{:?} mapping is not available on the 3-core platform",
                other.name()
            ))),
        }
    }

    /// Translates to the strategy passed to the general front end.
    pub fn to_inner(&self) -> MappingStrategy {
        match self {
            Self::ZigZag => MappingStrategy::ThreeCore,
            Self::Static { file } => MappingStrategy::StaticTriCore { file: file.clone() },
            Self::StaticModes { file } => MappingStrategy::StaticModes { file: file.clone() },
        }
    }

    /// True when the strategy only makes sense with a modes-switching application.
    pub const fn requires_modes_file(&self) -> bool {
        matches!(self, Self::StaticModes { .. })
    }
}
