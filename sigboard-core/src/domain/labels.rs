//! Human-readable classifications attached to enriched rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification derived from signal strength and average profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verdict {
    Favourable,
    Marginal,
    Unfavourable,
    InsufficientData,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::Favourable,
        Verdict::Marginal,
        Verdict::Unfavourable,
        Verdict::InsufficientData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Favourable => "Favourable",
            Verdict::Marginal => "Marginal",
            Verdict::Unfavourable => "Unfavourable",
            Verdict::InsufficientData => "Insufficient data",
        }
    }

    /// Lenient parse for CLI arguments (`favourable`, `insufficient-data`, ...).
    pub fn parse_arg(s: &str) -> Option<Self> {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match norm.as_str() {
            "favourable" | "favorable" => Some(Verdict::Favourable),
            "marginal" => Some(Verdict::Marginal),
            "unfavourable" | "unfavorable" => Some(Verdict::Unfavourable),
            "insufficientdata" | "insufficient" => Some(Verdict::InsufficientData),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Confidence tier from sample size N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
    None,
    Unknown,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
            Confidence::None => "None",
            Confidence::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Volatility regime implied by the signal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityRegime {
    Trend,
    Range,
}

impl VolatilityRegime {
    pub fn label(self) -> &'static str {
        match self {
            VolatilityRegime::Trend => "Trend (rising volatility)",
            VolatilityRegime::Range => "Range (falling volatility)",
        }
    }
}

impl fmt::Display for VolatilityRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
