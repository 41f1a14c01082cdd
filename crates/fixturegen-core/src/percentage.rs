use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A ratio bounded to `[0, 1]`, displayed as a percentage.
///
/// Built from a float ratio (`0.25`) or an integer percentage (`25`); both
/// constructors reject out-of-range input so an invalid percentage can never
/// reach generation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "PercentageRepr", into = "f64")]
pub struct Percentage {
    percent: f64,
}

impl Percentage {
    pub const ZERO: Percentage = Percentage { percent: 0.0 };
    pub const ALWAYS: Percentage = Percentage { percent: 100.0 };

    /// Build from a ratio in `[0, 1]`.
    pub fn from_ratio(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::InvalidPercentage(format!(
                "float values must be between 0 and 1, got {value}"
            )));
        }
        Ok(Self {
            percent: value * 100.0,
        })
    }

    /// Build from an integer percentage in `[0, 100]`.
    pub fn from_int(value: i32) -> Result<Self> {
        if !(0..=100).contains(&value) {
            return Err(Error::InvalidPercentage(format!(
                "integer values must be between 0 and 100, got {value}"
            )));
        }
        Ok(Self {
            percent: f64::from(value),
        })
    }

    pub fn ratio(&self) -> f64 {
        self.percent / 100.0
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_zero(&self) -> bool {
        self.percent == 0.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.percent * 1_000_000.0).round() / 1_000_000.0;
        write!(f, "{rounded}%")
    }
}

impl Mul<i32> for Percentage {
    type Output = f64;

    fn mul(self, value: i32) -> f64 {
        f64::from(value) * self.ratio()
    }
}

impl Mul<Percentage> for i32 {
    type Output = f64;

    fn mul(self, percentage: Percentage) -> f64 {
        percentage * self
    }
}

impl TryFrom<f64> for Percentage {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_ratio(value)
    }
}

impl TryFrom<f32> for Percentage {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        Self::from_ratio(f64::from(value))
    }
}

impl TryFrom<i32> for Percentage {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::from_int(value)
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.ratio()
    }
}

/// Integers are percentages, floats are ratios.
#[derive(Deserialize)]
#[serde(untagged)]
enum PercentageRepr {
    Int(i64),
    Float(f64),
}

impl TryFrom<PercentageRepr> for Percentage {
    type Error = Error;

    fn try_from(value: PercentageRepr) -> Result<Self> {
        match value {
            PercentageRepr::Int(value) => {
                let value = i32::try_from(value).map_err(|_| {
                    Error::InvalidPercentage(format!(
                        "integer values must be between 0 and 100, got {value}"
                    ))
                })?;
                Self::from_int(value)
            }
            PercentageRepr::Float(value) => Self::from_ratio(value),
        }
    }
}
