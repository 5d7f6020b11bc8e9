use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Holding timeframe of a signal.
///
/// The six known timeframes have a fixed total order. Any other label read
/// from a workbook is kept verbatim as `Other` and sorts after all known
/// values (ties between unknown labels fall back to the label text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M5,
    M30,
    H1,
    H6,
    H12,
    H24,
    Other(String),
}

impl Timeframe {
    /// Known timeframes in display order.
    pub const ORDER: [Timeframe; 6] = [
        Timeframe::M5,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H6,
        Timeframe::H12,
        Timeframe::H24,
    ];

    /// Parse a workbook label. Never fails: unknown labels become `Other`.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "5m" => Timeframe::M5,
            "30m" => Timeframe::M30,
            "1h" => Timeframe::H1,
            "6h" => Timeframe::H6,
            "12h" => Timeframe::H12,
            "24h" => Timeframe::H24,
            other => Timeframe::Other(other.to_string()),
        }
    }

    /// Position in [`Timeframe::ORDER`], or `None` for out-of-band labels.
    pub fn rank(&self) -> Option<usize> {
        match self {
            Timeframe::M5 => Some(0),
            Timeframe::M30 => Some(1),
            Timeframe::H1 => Some(2),
            Timeframe::H6 => Some(3),
            Timeframe::H12 => Some(4),
            Timeframe::H24 => Some(5),
            Timeframe::Other(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Timeframe::M5 => "5m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H6 => "6h",
            Timeframe::H12 => "12h",
            Timeframe::H24 => "24h",
            Timeframe::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        self.rank().is_some()
    }
}

impl Ord for Timeframe {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label().cmp(other.label()),
        }
    }
}

impl PartialOrd for Timeframe {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
