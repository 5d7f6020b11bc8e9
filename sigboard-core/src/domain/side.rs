use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Buy, Direction::Sell];

    /// Canonical spelling used in the workbook.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Direction::Buy),
            "sell" => Ok(Direction::Sell),
            _ => Err(SideParseError {
                expected: "Buy or Sell",
                got: s.to_string(),
            }),
        }
    }
}

/// Which side of the threshold the signal applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Above,
    Below,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::Above, Condition::Below];

    /// Canonical spelling used in the workbook.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Above => "above",
            Condition::Below => "below",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Condition::Above => Condition::Below,
            Condition::Below => Condition::Above,
        }
    }

    /// Case-insensitive match against a raw "side" discriminator.
    pub fn matches_side(self, side: &str) -> bool {
        side.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "above" => Ok(Condition::Above),
            "below" => Ok(Condition::Below),
            _ => Err(SideParseError {
                expected: "above or below",
                got: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got '{got}'")]
pub struct SideParseError {
    pub expected: &'static str,
    pub got: String,
}

/// One of the four per-timeframe summary tables (direction × condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SummaryVariant {
    pub direction: Direction,
    pub condition: Condition,
}

impl SummaryVariant {
    pub const ALL: [SummaryVariant; 4] = [
        SummaryVariant::new(Direction::Buy, Condition::Above),
        SummaryVariant::new(Direction::Buy, Condition::Below),
        SummaryVariant::new(Direction::Sell, Condition::Above),
        SummaryVariant::new(Direction::Sell, Condition::Below),
    ];

    pub const fn new(direction: Direction, condition: Condition) -> Self {
        Self {
            direction,
            condition,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SummaryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.direction, self.condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("Buy".parse::<Direction>().unwrap(), Direction::Buy);
        assert_eq!(" sell ".parse::<Direction>().unwrap(), Direction::Sell);
        assert!("hold".parse::<Direction>().is_err());
    }

    #[test]
    fn condition_matches_side_ignoring_case() {
        assert!(Condition::Above.matches_side("ABOVE"));
        assert!(Condition::Below.matches_side("Below"));
        assert!(!Condition::Above.matches_side("below"));
    }

    #[test]
    fn summary_variant_cycles_through_all_four() {
        let mut v = SummaryVariant::ALL[0];
        for expected in SummaryVariant::ALL.iter().skip(1) {
            v = v.next();
            assert_eq!(v, *expected);
        }
        assert_eq!(v.next(), SummaryVariant::ALL[0]);
    }
}
