//! Typed rows read from the workbook and produced by the enricher.
//!
//! Every numeric statistic is an `Option<f64>`: an empty spreadsheet cell or an
//! unmatched join stays `None` all the way to the table, where it renders as
//! an empty cell.

use super::labels::{Confidence, Verdict, VolatilityRegime};
use super::side::{Condition, Direction};
use super::threshold::Threshold;
use super::timeframe::Timeframe;

/// Join key shared by all tables: (Timeframe, Threshold).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinKey {
    pub timeframe: Timeframe,
    pub threshold: Threshold,
}

impl JoinKey {
    pub fn new(timeframe: Timeframe, threshold: Threshold) -> Self {
        Self {
            timeframe,
            threshold,
        }
    }
}

/// One row of the primary predictions sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub direction: Direction,
    pub condition: Condition,
    pub timeframe: Timeframe,
    pub threshold: Threshold,
    pub ml_pred_prob: Option<f64>,
    pub historical_win_ratio: Option<f64>,
}

impl PredictionRow {
    pub fn key(&self) -> JoinKey {
        JoinKey::new(self.timeframe.clone(), self.threshold)
    }
}

/// One row of a buy or sell confidence-interval sheet.
///
/// `side` is kept as written; it is compared case-insensitively against the
/// requested condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceIntervalRow {
    pub side: String,
    pub timeframe: Timeframe,
    pub threshold: Threshold,
    pub n: Option<f64>,
    pub prob: Option<f64>,
    pub wilson_l: Option<f64>,
    pub wilson_u: Option<f64>,
}

impl ConfidenceIntervalRow {
    pub fn key(&self) -> JoinKey {
        JoinKey::new(self.timeframe.clone(), self.threshold)
    }

    pub fn project(&self) -> CiMatch {
        CiMatch {
            n: self.n,
            prob: self.prob,
            wilson_l: self.wilson_l,
            wilson_u: self.wilson_u,
        }
    }
}

/// Join-relevant columns of a confidence-interval row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CiMatch {
    pub n: Option<f64>,
    pub prob: Option<f64>,
    pub wilson_l: Option<f64>,
    pub wilson_u: Option<f64>,
}

/// One row of the descriptive-statistics sheet.
///
/// Direction and condition are kept as written; the descriptive join matches
/// them exactly against the canonical spellings (`Buy`, `above`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveRow {
    pub direction: String,
    pub condition: String,
    pub timeframe: Timeframe,
    pub threshold: Threshold,
    pub n: Option<f64>,
    pub avg_profit_pct: Option<f64>,
    pub min_profit_pct: Option<f64>,
    pub max_profit_pct: Option<f64>,
    pub status: Option<String>,
    pub win_ratio: Option<f64>,
}

impl DescriptiveRow {
    pub fn key(&self) -> JoinKey {
        JoinKey::new(self.timeframe.clone(), self.threshold)
    }

    pub fn project(&self) -> DescriptiveMatch {
        DescriptiveMatch {
            n: self.n,
            avg_profit_pct: self.avg_profit_pct,
            min_profit_pct: self.min_profit_pct,
            max_profit_pct: self.max_profit_pct,
            status: self.status.clone(),
            win_ratio: self.win_ratio,
        }
    }
}

/// Join-relevant columns of a descriptive row.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveMatch {
    pub n: Option<f64>,
    pub avg_profit_pct: Option<f64>,
    pub min_profit_pct: Option<f64>,
    pub max_profit_pct: Option<f64>,
    pub status: Option<String>,
    pub win_ratio: Option<f64>,
}

/// One row of a per-timeframe summary sheet. Displayed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub timeframe: Timeframe,
    pub threshold: Option<Threshold>,
    pub n: Option<f64>,
    pub win_ratio: Option<f64>,
    pub wilson_l: Option<f64>,
    pub wilson_u: Option<f64>,
    pub base_win_ratio: Option<f64>,
    pub lift_vs_base: Option<f64>,
}

/// A prediction row joined with its auxiliary matches plus derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub prediction: PredictionRow,
    pub ci: Option<CiMatch>,
    pub descriptive: Option<DescriptiveMatch>,
    /// Sample size backing the confidence tier.
    pub n: Option<f64>,
    pub margin_of_error: Option<f64>,
    pub confidence: Confidence,
    pub signal_strength: Option<f64>,
    pub regime: VolatilityRegime,
    pub verdict: Verdict,
}

impl EnrichedRow {
    pub fn key(&self) -> JoinKey {
        self.prediction.key()
    }

    pub fn threshold(&self) -> Threshold {
        self.prediction.threshold
    }

    pub fn timeframe(&self) -> &Timeframe {
        &self.prediction.timeframe
    }

    pub fn avg_profit_pct(&self) -> Option<f64> {
        self.descriptive.as_ref().and_then(|d| d.avg_profit_pct)
    }
}
