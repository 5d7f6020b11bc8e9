//! Fixed-point threshold values.
//!
//! Thresholds arrive as spreadsheet floats (`0.5`, `1.0`, `2.5`). They are
//! stored as integers scaled by [`Threshold::SCALE`] so equality, hashing and
//! ordering are exact and `1.0` read from one sheet always matches `1.0` read
//! from another.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Threshold(i64);

impl Threshold {
    /// Units per 1.0 (six decimal places).
    pub const SCALE: i64 = 1_000_000;

    /// Round a float to the nearest representable threshold.
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * Self::SCALE as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as i64))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

/// Shortest decimal form, but always with a fractional digit (`1.0`, `2.5`).
impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % Self::SCALE == 0 {
            write!(f, "{:.1}", self.as_f64())
        } else {
            write!(f, "{}", self.as_f64())
        }
    }
}

impl FromStr for Threshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid threshold '{s}'"))?;
        Threshold::from_f64(value).ok_or_else(|| format!("threshold out of range: '{s}'"))
    }
}

impl Serialize for Threshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Threshold::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("threshold out of range: {value}")))
    }
}
