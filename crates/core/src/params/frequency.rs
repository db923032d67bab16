//! Core frequency parameter.
//!
//! A frequency is written as decimal digits immediately followed by a unit key, e.g. `400MHz`
//! or `1GHz`. The parsed value keeps the original spelling (the 3-core front end forwards it
//! untouched) alongside the normalized value in hertz (what the simulator receives).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Result, RunnerError};

/// Accepted unit keys and their multipliers to hertz.
pub const FREQUENCY_UNITS: [(&str, u64); 4] = [
    ("GHz", 1_000_000_000),
    ("MHz", 1_000_000),
    ("KHz", 1_000),
    ("Hz", 1),
];

/// A validated core frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Frequency {
    raw: String,
    hertz: u64,
}

impl Frequency {
    /// Parses `<digits><unit>` into a frequency.
    ///
    /// The leading ASCII digits are the magnitude and the entire remainder must be one of the
    /// keys in [`FREQUENCY_UNITS`]. A zero magnitude is rejected since core frequencies are
    /// strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidArgument`] when there are no leading digits, the unit is
    /// not recognized, or the value does not fit in a `u64` number of hertz.
    pub fn parse(raw: &str) -> Result<Self> {
        let split = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let (digits, unit) = raw.split_at(split);
        if digits.is_empty() {
            return Err(invalid_frequency(raw));
        }

        let multiplier = FREQUENCY_UNITS
            .iter()
            .find(|(key, _)| *key == unit)
            .map(|(_, multiplier)| *multiplier)
            .ok_or_else(|| invalid_frequency(raw))?;

        let hertz = digits
            .parse::<u64>()
            .ok()
            .and_then(|magnitude| magnitude.checked_mul(multiplier))
            .filter(|hz| *hz > 0)
            .ok_or_else(|| invalid_frequency(raw))?;

        Ok(Self {
            raw: raw.to_owned(),
            hertz,
        })
    }

    /// Value in hertz.
    pub const fn hertz(&self) -> u64 {
        self.hertz
    }

    /// The spelling the frequency was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for Frequency {
    /// 1 GHz.
    fn default() -> Self {
        Self {
            raw: "1GHz".to_owned(),
            hertz: 1_000_000_000,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for Frequency {
    type Error = RunnerError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.raw
    }
}

fn invalid_frequency(raw: &str) -> RunnerError {
    let units: Vec<&str> = FREQUENCY_UNITS.iter().map(|(key, _)| *key).collect();
    RunnerError::invalid(format!(
        "{raw:?} is an invalid frequency. Correct format is a number followed by a unit among {units:?}"
    ))
}
