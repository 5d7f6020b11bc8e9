//! Enrichment: narrow the predictions to one direction and condition, left-join
//! the confidence-interval and descriptive sources on (Timeframe, Threshold),
//! and attach the derived columns.
//!
//! Missing optional sources never fail enrichment; their joins are skipped and
//! the fields they would have supplied stay `None`.

pub mod derive;
pub mod join;

pub use derive::{
    confidence_from_n, margin_of_error, regime_label, signal_strength, verdict,
};
pub use join::{dedup_by_key, index_by_key, select_ci, select_descriptive, Keyed};

use tracing::debug;

use crate::data::{ColumnPresence, Workbook};
use crate::domain::{Condition, Direction, EnrichedRow, PredictionRow};

/// What to enrich.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichRequest {
    pub direction: Direction,
    pub condition: Condition,
    /// When false the confidence-interval join is skipped entirely.
    pub include_ci: bool,
}

/// Enriched rows plus which joins ran and the columns their sources carried.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub rows: Vec<EnrichedRow>,
    /// Columns of the confidence-interval source, when that join ran.
    pub ci_columns: Option<ColumnPresence>,
    /// Columns of the descriptive source, when that join ran.
    pub descriptive_columns: Option<ColumnPresence>,
}

impl Enrichment {
    pub fn ci_joined(&self) -> bool {
        self.ci_columns.is_some()
    }

    pub fn descriptive_joined(&self) -> bool {
        self.descriptive_columns.is_some()
    }
}

/// Run the enrichment pipeline over a loaded workbook.
///
/// Output rows are sorted by (Timeframe, Threshold) and there is exactly one
/// per prediction row of the requested direction and condition.
pub fn enrich(workbook: &Workbook, request: &EnrichRequest) -> Enrichment {
    let mut base: Vec<&PredictionRow> = workbook
        .predictions
        .rows
        .iter()
        .filter(|r| r.direction == request.direction && r.condition == request.condition)
        .collect();
    base.sort_by_key(|r| r.key());

    let ci_table = if request.include_ci {
        workbook.confidence_intervals(request.direction)
    } else {
        None
    };
    let ci_index = ci_table.map(|table| {
        let selected = select_ci(&table.rows, request.condition);
        let before = selected.len();
        let index = index_by_key(selected);
        debug!(
            direction = %request.direction,
            condition = %request.condition,
            kept = index.len(),
            dropped = before - index.len(),
            "confidence-interval rows deduplicated"
        );
        index
    });
    if ci_index.is_none() {
        debug!(include_ci = request.include_ci, "confidence-interval join skipped");
    }

    let desc_table = workbook.descriptive.as_ref();
    let desc_index = desc_table.map(|table| {
        let selected = select_descriptive(&table.rows, request.direction, request.condition);
        let before = selected.len();
        let index = index_by_key(selected);
        debug!(
            kept = index.len(),
            dropped = before - index.len(),
            "descriptive rows deduplicated"
        );
        index
    });
    if desc_index.is_none() {
        debug!("descriptive join skipped");
    }

    let rows = base
        .into_iter()
        .map(|prediction| {
            let key = prediction.key();
            let ci = ci_index
                .as_ref()
                .and_then(|idx| idx.get(&key))
                .map(|r| r.project());
            let descriptive = desc_index
                .as_ref()
                .and_then(|idx| idx.get(&key))
                .map(|r| r.project());

            // N follows whichever join ran, CI first; an unmatched row in a
            // join that ran is null rather than borrowed from the other source.
            let n = if ci_index.is_some() {
                ci.and_then(|c| c.n)
            } else if desc_index.is_some() {
                descriptive.as_ref().and_then(|d| d.n)
            } else {
                None
            };

            let margin = ci.and_then(|c| margin_of_error(c.wilson_l, c.wilson_u));
            let strength = signal_strength(prediction.ml_pred_prob, prediction.historical_win_ratio);
            let avg_profit = descriptive.as_ref().and_then(|d| d.avg_profit_pct);

            EnrichedRow {
                prediction: prediction.clone(),
                ci,
                descriptive,
                n,
                margin_of_error: margin,
                confidence: confidence_from_n(n),
                signal_strength: strength,
                regime: regime_label(prediction.condition.as_str()),
                verdict: verdict(strength, avg_profit),
            }
        })
        .collect();

    Enrichment {
        rows,
        ci_columns: ci_table.map(|t| t.presence.clone()),
        descriptive_columns: desc_table.map(|t| t.presence.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{self, col};
    use crate::data::Table;
    use crate::domain::{
        Confidence, ConfidenceIntervalRow, DescriptiveRow, Threshold, Timeframe, Verdict,
        VolatilityRegime,
    };

    fn thr(v: f64) -> Threshold {
        Threshold::from_f64(v).unwrap()
    }

    fn prediction(dir: Direction, cond: Condition, tf: &str, t: f64) -> PredictionRow {
        PredictionRow {
            direction: dir,
            condition: cond,
            timeframe: Timeframe::parse(tf),
            threshold: thr(t),
            ml_pred_prob: Some(0.6),
            historical_win_ratio: Some(0.5),
        }
    }

    fn ci_row(side: &str, tf: &str, t: f64, n: f64, l: f64, p: f64, u: f64) -> ConfidenceIntervalRow {
        ConfidenceIntervalRow {
            side: side.into(),
            timeframe: Timeframe::parse(tf),
            threshold: thr(t),
            n: Some(n),
            prob: Some(p),
            wilson_l: Some(l),
            wilson_u: Some(u),
        }
    }

    fn desc_row(tf: &str, t: f64, n: f64, avg: f64) -> DescriptiveRow {
        DescriptiveRow {
            direction: "Buy".into(),
            condition: "above".into(),
            timeframe: Timeframe::parse(tf),
            threshold: thr(t),
            n: Some(n),
            avg_profit_pct: Some(avg),
            min_profit_pct: Some(-1.0),
            max_profit_pct: Some(2.0),
            status: Some("ok".into()),
            win_ratio: Some(0.55),
        }
    }

    const BUY_ABOVE: EnrichRequest = EnrichRequest {
        direction: Direction::Buy,
        condition: Condition::Above,
        include_ci: true,
    };

    #[test]
    fn highest_n_ci_row_wins_the_join() {
        let mut wb = Workbook::from_predictions(vec![prediction(
            Direction::Buy,
            Condition::Above,
            "1h",
            1.0,
        )]);
        wb.ci_buy = Some(Table::complete(
            vec![
                ci_row("above", "1h", 1.0, 200.0, 0.30, 0.40, 0.50),
                ci_row("above", "1h", 1.0, 500.0, 0.52, 0.55, 0.58),
            ],
            &schema::CONFIDENCE_INTERVALS,
        ));

        let out = enrich(&wb, &BUY_ABOVE);
        assert_eq!(out.rows.len(), 1);
        let row = &out.rows[0];
        assert_eq!(row.n, Some(500.0));
        assert_eq!(row.confidence, Confidence::Medium);
        let ci = row.ci.unwrap();
        assert!(ci.wilson_l.unwrap() <= ci.prob.unwrap());
        assert!(ci.prob.unwrap() <= ci.wilson_u.unwrap());
        let margin = row.margin_of_error.unwrap();
        assert_eq!(margin, (0.58 - 0.52) / 2.0);
        assert!(margin >= 0.0);
        assert_eq!(row.regime, VolatilityRegime::Trend);
        assert!((row.signal_strength.unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(row.verdict, Verdict::Favourable);
    }

    #[test]
    fn rows_are_narrowed_and_sorted() {
        let wb = Workbook::from_predictions(vec![
            prediction(Direction::Buy, Condition::Above, "24h", 0.5),
            prediction(Direction::Sell, Condition::Above, "1h", 1.0),
            prediction(Direction::Buy, Condition::Above, "5m", 1.5),
            prediction(Direction::Buy, Condition::Below, "5m", 1.0),
            prediction(Direction::Buy, Condition::Above, "5m", 1.0),
        ]);
        let out = enrich(&wb, &BUY_ABOVE);
        let keys: Vec<(Timeframe, f64)> = out
            .rows
            .iter()
            .map(|r| (r.timeframe().clone(), r.threshold().as_f64()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (Timeframe::M5, 1.0),
                (Timeframe::M5, 1.5),
                (Timeframe::H24, 0.5),
            ]
        );
    }

    #[test]
    fn absent_sources_leave_fields_empty() {
        let wb = Workbook::from_predictions(vec![prediction(
            Direction::Buy,
            Condition::Above,
            "1h",
            1.0,
        )]);
        let out = enrich(&wb, &BUY_ABOVE);
        assert!(!out.ci_joined());
        assert!(!out.descriptive_joined());
        let row = &out.rows[0];
        assert!(row.ci.is_none());
        assert!(row.descriptive.is_none());
        assert_eq!(row.n, None);
        assert_eq!(row.confidence, Confidence::Unknown);
        assert_eq!(row.margin_of_error, None);
    }

    #[test]
    fn ci_toggle_off_skips_join_and_falls_back_to_descriptive_n() {
        let mut wb = Workbook::from_predictions(vec![prediction(
            Direction::Buy,
            Condition::Above,
            "1h",
            1.0,
        )]);
        wb.ci_buy = Some(Table::complete(
            vec![ci_row("above", "1h", 1.0, 500.0, 0.5, 0.55, 0.6)],
            &schema::CONFIDENCE_INTERVALS,
        ));
        wb.descriptive = Some(Table::complete(
            vec![desc_row("1h", 1.0, 1200.0, 0.1)],
            &schema::DESCRIPTIVE,
        ));

        let request = EnrichRequest {
            include_ci: false,
            ..BUY_ABOVE
        };
        let out = enrich(&wb, &request);
        assert!(!out.ci_joined());
        assert!(out.descriptive_joined());
        let row = &out.rows[0];
        assert!(row.ci.is_none());
        assert_eq!(row.n, Some(1200.0));
        assert_eq!(row.confidence, Confidence::High);
        assert_eq!(row.avg_profit_pct(), Some(0.1));
    }

    #[test]
    fn unmatched_ci_row_does_not_borrow_descriptive_n() {
        let mut wb = Workbook::from_predictions(vec![prediction(
            Direction::Buy,
            Condition::Above,
            "1h",
            1.0,
        )]);
        wb.ci_buy = Some(Table::complete(
            vec![ci_row("above", "5m", 1.0, 500.0, 0.5, 0.55, 0.6)],
            &schema::CONFIDENCE_INTERVALS,
        ));
        wb.descriptive = Some(Table::complete(
            vec![desc_row("1h", 1.0, 1200.0, 0.1)],
            &schema::DESCRIPTIVE,
        ));

        let out = enrich(&wb, &BUY_ABOVE);
        let row = &out.rows[0];
        assert!(row.ci.is_none());
        assert!(row.descriptive.is_some());
        assert_eq!(row.n, None);
        assert_eq!(row.confidence, Confidence::Unknown);
    }

    #[test]
    fn sell_requests_use_the_sell_ci_source() {
        let mut wb = Workbook::from_predictions(vec![prediction(
            Direction::Sell,
            Condition::Below,
            "6h",
            2.0,
        )]);
        wb.ci_buy = Some(Table::complete(
            vec![ci_row("below", "6h", 2.0, 900.0, 0.4, 0.5, 0.6)],
            &schema::CONFIDENCE_INTERVALS,
        ));
        wb.ci_sell = Some(Table::complete(
            vec![ci_row("Below", "6h", 2.0, 40.0, 0.3, 0.45, 0.6)],
            &schema::CONFIDENCE_INTERVALS,
        ));

        let out = enrich(
            &wb,
            &EnrichRequest {
                direction: Direction::Sell,
                condition: Condition::Below,
                include_ci: true,
            },
        );
        let row = &out.rows[0];
        assert_eq!(row.n, Some(40.0));
        assert_eq!(row.confidence, Confidence::Low);
        assert_eq!(row.regime, VolatilityRegime::Range);
    }

    #[test]
    fn ci_presence_is_reported() {
        let mut wb = Workbook::from_predictions(vec![]);
        wb.ci_buy = Some(Table::complete(vec![], &schema::CONFIDENCE_INTERVALS));
        let out = enrich(&wb, &BUY_ABOVE);
        assert!(out.rows.is_empty());
        assert!(out.ci_columns.as_ref().unwrap().has(col::WILSON_L));
    }
}
