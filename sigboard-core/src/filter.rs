//! User selections and the row filters they drive.
//!
//! A [`Selection`] is everything the signals dashboard lets the user pick. It
//! is serializable so the TUI can persist it between sessions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{
    Condition, Direction, EnrichedRow, PredictionRow, SummaryRow, Threshold, Timeframe, Verdict,
};
use crate::enrich::EnrichRequest;

/// One threshold, or every threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThresholdChoice {
    #[default]
    All,
    Only(Threshold),
}

impl ThresholdChoice {
    /// Exact fixed-point match.
    pub fn admits(self, threshold: Threshold) -> bool {
        match self {
            ThresholdChoice::All => true,
            ThresholdChoice::Only(t) => t == threshold,
        }
    }

    /// Step through `All, t0, t1, ..., tn, All` in the given direction.
    ///
    /// A threshold no longer in `available` restarts from the nearest end.
    pub fn cycle(self, available: &[Threshold], forward: bool) -> Self {
        if available.is_empty() {
            return ThresholdChoice::All;
        }
        let last = available.len() - 1;
        let position = match self {
            ThresholdChoice::All => None,
            ThresholdChoice::Only(t) => available.iter().position(|a| *a == t),
        };
        let next = match (position, forward) {
            (None, true) => Some(0),
            (None, false) => Some(last),
            (Some(i), true) if i < last => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            (Some(_), _) => None,
        };
        match next {
            Some(i) => ThresholdChoice::Only(available[i]),
            None => ThresholdChoice::All,
        }
    }

    pub fn label(self) -> String {
        match self {
            ThresholdChoice::All => "all".to_string(),
            ThresholdChoice::Only(t) => t.to_string(),
        }
    }
}

/// Signals dashboard selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub direction: Direction,
    pub condition: Condition,
    pub show_ci: bool,
    pub threshold: ThresholdChoice,
    pub verdicts: BTreeSet<Verdict>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            direction: Direction::Buy,
            condition: Condition::Above,
            show_ci: true,
            threshold: ThresholdChoice::All,
            verdicts: Verdict::ALL.into_iter().collect(),
        }
    }
}

impl Selection {
    /// The enrichment this selection asks for.
    pub fn request(&self) -> EnrichRequest {
        EnrichRequest {
            direction: self.direction,
            condition: self.condition,
            include_ci: self.show_ci,
        }
    }

    /// Threshold and verdict test. Direction and condition are already applied
    /// by enrichment.
    pub fn matches(&self, row: &EnrichedRow) -> bool {
        self.threshold.admits(row.threshold()) && self.verdicts.contains(&row.verdict)
    }

    pub fn apply(&self, rows: Vec<EnrichedRow>) -> Vec<EnrichedRow> {
        rows.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Add `verdict` if missing, remove it if present.
    pub fn toggle_verdict(&mut self, verdict: Verdict) {
        if !self.verdicts.remove(&verdict) {
            self.verdicts.insert(verdict);
        }
    }

    pub fn shows_verdict(&self, verdict: Verdict) -> bool {
        self.verdicts.contains(&verdict)
    }
}

/// Distinct thresholds in ascending order.
pub fn available_thresholds(rows: &[PredictionRow]) -> Vec<Threshold> {
    rows.iter()
        .map(|r| r.threshold)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One summary timeframe, or every timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeframeChoice {
    #[default]
    All,
    Only(Timeframe),
}

impl TimeframeChoice {
    pub fn admits(&self, timeframe: &Timeframe) -> bool {
        match self {
            TimeframeChoice::All => true,
            TimeframeChoice::Only(t) => t == timeframe,
        }
    }

    /// Step through `All, tf0, ..., tfn, All`.
    pub fn cycle(&self, available: &[Timeframe], forward: bool) -> Self {
        if available.is_empty() {
            return TimeframeChoice::All;
        }
        let last = available.len() - 1;
        let position = match self {
            TimeframeChoice::All => None,
            TimeframeChoice::Only(t) => available.iter().position(|a| a == t),
        };
        let next = match (position, forward) {
            (None, true) => Some(0),
            (None, false) => Some(last),
            (Some(i), true) if i < last => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            (Some(_), _) => None,
        };
        match next {
            Some(i) => TimeframeChoice::Only(available[i].clone()),
            None => TimeframeChoice::All,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TimeframeChoice::All => "all".to_string(),
            TimeframeChoice::Only(t) => t.to_string(),
        }
    }
}

/// Summary rows whose timeframe the choice admits, in input order.
pub fn filter_summary<'a>(rows: &'a [SummaryRow], choice: &TimeframeChoice) -> Vec<&'a SummaryRow> {
    rows.iter().filter(|r| choice.admits(&r.timeframe)).collect()
}

/// Distinct summary timeframes in timeframe order.
pub fn available_timeframes(rows: &[SummaryRow]) -> Vec<Timeframe> {
    rows.iter()
        .map(|r| r.timeframe.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
