//! Table view models for the enriched signals and the per-timeframe summaries.
//!
//! A column is shown only if its source existed for the whole pass: the
//! interval columns need the confidence-interval join, the profit columns the
//! descriptive join, and so on. Cells are preformatted strings.

use super::format::{count, percent, profit, signed_percent};
use crate::data::schema::col;
use crate::data::ColumnPresence;
use crate::domain::{Confidence, EnrichedRow, SummaryRow, Verdict};
use crate::enrich::Enrichment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalColumn {
    Direction,
    Condition,
    Timeframe,
    Threshold,
    HistoricalWinRatio,
    MlPredProb,
    SignalStrength,
    WilsonL,
    WilsonU,
    MarginOfError,
    N,
    Confidence,
    AvgProfit,
    MinProfit,
    MaxProfit,
    VolatilityRegime,
    Verdict,
}

impl SignalColumn {
    pub const ALL: [SignalColumn; 17] = [
        SignalColumn::Direction,
        SignalColumn::Condition,
        SignalColumn::Timeframe,
        SignalColumn::Threshold,
        SignalColumn::HistoricalWinRatio,
        SignalColumn::MlPredProb,
        SignalColumn::SignalStrength,
        SignalColumn::WilsonL,
        SignalColumn::WilsonU,
        SignalColumn::MarginOfError,
        SignalColumn::N,
        SignalColumn::Confidence,
        SignalColumn::AvgProfit,
        SignalColumn::MinProfit,
        SignalColumn::MaxProfit,
        SignalColumn::VolatilityRegime,
        SignalColumn::Verdict,
    ];

    pub fn header(self) -> &'static str {
        match self {
            SignalColumn::Direction => col::DIRECTION,
            SignalColumn::Condition => col::CONDITION,
            SignalColumn::Timeframe => col::TIMEFRAME,
            SignalColumn::Threshold => col::THRESHOLD,
            SignalColumn::HistoricalWinRatio => col::HISTORICAL_WIN_RATIO,
            SignalColumn::MlPredProb => col::ML_PRED_PROB,
            SignalColumn::SignalStrength => "Signal_Strength",
            SignalColumn::WilsonL => col::WILSON_L,
            SignalColumn::WilsonU => col::WILSON_U,
            SignalColumn::MarginOfError => "Margin_of_Error",
            SignalColumn::N => col::N,
            SignalColumn::Confidence => "Confidence",
            SignalColumn::AvgProfit => col::AVG_PROFIT_PCT,
            SignalColumn::MinProfit => col::MIN_PROFIT_PCT,
            SignalColumn::MaxProfit => col::MAX_PROFIT_PCT,
            SignalColumn::VolatilityRegime => "Volatility_Regime",
            SignalColumn::Verdict => "Verdict",
        }
    }

    fn visible(self, ci: Option<&ColumnPresence>, desc: Option<&ColumnPresence>) -> bool {
        let ci_has = |c: &str| ci.is_some_and(|p| p.has(c));
        let desc_has = |c: &str| desc.is_some_and(|p| p.has(c));
        match self {
            SignalColumn::WilsonL => ci_has(col::WILSON_L),
            SignalColumn::WilsonU => ci_has(col::WILSON_U),
            SignalColumn::MarginOfError => ci_has(col::WILSON_L) && ci_has(col::WILSON_U),
            // N comes from the interval join when it ran, else the descriptive one.
            SignalColumn::N => match ci {
                Some(p) => p.has(col::N),
                None => desc_has(col::N),
            },
            SignalColumn::AvgProfit => desc_has(col::AVG_PROFIT_PCT),
            SignalColumn::MinProfit => desc_has(col::MIN_PROFIT_PCT),
            SignalColumn::MaxProfit => desc_has(col::MAX_PROFIT_PCT),
            _ => true,
        }
    }

    fn cell(self, row: &EnrichedRow) -> String {
        let p = &row.prediction;
        let desc = row.descriptive.as_ref();
        match self {
            SignalColumn::Direction => p.direction.to_string(),
            SignalColumn::Condition => p.condition.to_string(),
            SignalColumn::Timeframe => p.timeframe.to_string(),
            SignalColumn::Threshold => p.threshold.to_string(),
            SignalColumn::HistoricalWinRatio => percent(p.historical_win_ratio),
            SignalColumn::MlPredProb => percent(p.ml_pred_prob),
            SignalColumn::SignalStrength => signed_percent(row.signal_strength),
            SignalColumn::WilsonL => percent(row.ci.and_then(|c| c.wilson_l)),
            SignalColumn::WilsonU => percent(row.ci.and_then(|c| c.wilson_u)),
            SignalColumn::MarginOfError => percent(row.margin_of_error),
            SignalColumn::N => count(row.n),
            SignalColumn::Confidence => row.confidence.to_string(),
            SignalColumn::AvgProfit => profit(desc.and_then(|d| d.avg_profit_pct)),
            SignalColumn::MinProfit => profit(desc.and_then(|d| d.min_profit_pct)),
            SignalColumn::MaxProfit => profit(desc.and_then(|d| d.max_profit_pct)),
            SignalColumn::VolatilityRegime => row.regime.to_string(),
            SignalColumn::Verdict => row.verdict.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Kept alongside the text so renderers can colour by class.
    pub verdict: Verdict,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<SignalColumn>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Tabulate `rows`, which must come from `enrichment` (possibly filtered).
pub fn build_table(enrichment: &Enrichment, rows: &[EnrichedRow]) -> TableView {
    let ci = enrichment.ci_columns.as_ref();
    let desc = enrichment.descriptive_columns.as_ref();
    let columns: Vec<SignalColumn> = SignalColumn::ALL
        .into_iter()
        .filter(|c| c.visible(ci, desc))
        .collect();

    let rows = rows
        .iter()
        .map(|row| TableRow {
            cells: columns.iter().map(|c| c.cell(row)).collect(),
            verdict: row.verdict,
            confidence: row.confidence,
        })
        .collect();

    TableView { columns, rows }
}

// ── Summary ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryColumn {
    Timeframe,
    Threshold,
    N,
    WinRatio,
    WilsonL,
    WilsonU,
    BaseWinRatio,
    LiftVsBase,
}

impl SummaryColumn {
    pub const ALL: [SummaryColumn; 8] = [
        SummaryColumn::Timeframe,
        SummaryColumn::Threshold,
        SummaryColumn::N,
        SummaryColumn::WinRatio,
        SummaryColumn::WilsonL,
        SummaryColumn::WilsonU,
        SummaryColumn::BaseWinRatio,
        SummaryColumn::LiftVsBase,
    ];

    pub fn header(self) -> &'static str {
        match self {
            SummaryColumn::Timeframe => col::TIMEFRAME,
            SummaryColumn::Threshold => col::THRESHOLD,
            SummaryColumn::N => col::N,
            SummaryColumn::WinRatio => col::WIN_RATIO,
            SummaryColumn::WilsonL => col::WILSON_L,
            SummaryColumn::WilsonU => col::WILSON_U,
            SummaryColumn::BaseWinRatio => col::BASE_WIN_RATIO,
            SummaryColumn::LiftVsBase => col::LIFT_VS_BASE,
        }
    }

    fn cell(self, row: &SummaryRow) -> String {
        match self {
            SummaryColumn::Timeframe => row.timeframe.to_string(),
            SummaryColumn::Threshold => row.threshold.map(|t| t.to_string()).unwrap_or_default(),
            SummaryColumn::N => count(row.n),
            SummaryColumn::WinRatio => percent(row.win_ratio),
            SummaryColumn::WilsonL => percent(row.wilson_l),
            SummaryColumn::WilsonU => percent(row.wilson_u),
            SummaryColumn::BaseWinRatio => percent(row.base_win_ratio),
            SummaryColumn::LiftVsBase => signed_percent(row.lift_vs_base),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTableView {
    pub columns: Vec<SummaryColumn>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTableView {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header()).collect()
    }
}

/// Tabulate summary rows, showing only the columns the sheet had.
pub fn build_summary_table(presence: &ColumnPresence, rows: &[&SummaryRow]) -> SummaryTableView {
    let columns: Vec<SummaryColumn> = SummaryColumn::ALL
        .into_iter()
        .filter(|c| presence.has(c.header()))
        .collect();
    let rows = rows
        .iter()
        .map(|row| columns.iter().map(|c| c.cell(row)).collect())
        .collect();
    SummaryTableView { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{schema, Table};
    use crate::domain::{
        Condition, DescriptiveRow, Direction, PredictionRow, Threshold, Timeframe,
    };
    use crate::enrich::{enrich, EnrichRequest};
    use crate::Workbook;

    const REQUEST: EnrichRequest = EnrichRequest {
        direction: Direction::Buy,
        condition: Condition::Above,
        include_ci: true,
    };

    fn workbook() -> Workbook {
        Workbook::from_predictions(vec![PredictionRow {
            direction: Direction::Buy,
            condition: Condition::Above,
            timeframe: Timeframe::H1,
            threshold: Threshold::from_f64(1.0).unwrap(),
            ml_pred_prob: Some(0.61),
            historical_win_ratio: Some(0.58),
        }])
    }

    #[test]
    fn predictions_only_omits_joined_columns() {
        let wb = workbook();
        let e = enrich(&wb, &REQUEST);
        let table = build_table(&e, &e.rows);
        assert_eq!(
            table.headers(),
            vec![
                "Direction",
                "Condition",
                "Timeframe",
                "Threshold",
                "Historical_Win_Ratio",
                "ML_Pred_Prob",
                "Signal_Strength",
                "Confidence",
                "Volatility_Regime",
                "Verdict",
            ]
        );
        assert_eq!(
            table.rows[0].cells,
            vec![
                "Buy",
                "above",
                "1h",
                "1.0",
                "58.00%",
                "61.00%",
                "+3.00%",
                "Unknown",
                "Trend (rising volatility)",
                "Favourable",
            ]
        );
    }

    #[test]
    fn descriptive_columns_follow_sheet_presence() {
        let mut wb = workbook();
        // Direction .. Avg_Profit_%: no Min/Max/Status/Win_Ratio columns.
        let presence = ColumnPresence::all(&schema::SheetSchema {
            columns: &schema::DESCRIPTIVE.columns[..6],
        });
        wb.descriptive = Some(Table::new(
            vec![DescriptiveRow {
                direction: "Buy".into(),
                condition: "above".into(),
                timeframe: Timeframe::H1,
                threshold: Threshold::from_f64(1.0).unwrap(),
                n: Some(350.0),
                avg_profit_pct: Some(0.4),
                min_profit_pct: None,
                max_profit_pct: None,
                status: None,
                win_ratio: None,
            }],
            presence,
        ));
        let e = enrich(&wb, &REQUEST);
        let table = build_table(&e, &e.rows);
        let headers = table.headers();
        assert!(headers.contains(&"N"));
        assert!(headers.contains(&"Avg_Profit_%"));
        assert!(!headers.contains(&"Min_Profit_%"));
        assert!(!headers.contains(&"Wilson_L"));

        let n_idx = headers.iter().position(|h| *h == "N").unwrap();
        assert_eq!(table.rows[0].cells[n_idx], "350");
        let avg_idx = headers.iter().position(|h| *h == "Avg_Profit_%").unwrap();
        assert_eq!(table.rows[0].cells[avg_idx], "0.40%");
    }

    #[test]
    fn summary_table_formats_and_omits_absent_columns() {
        let rows = vec![SummaryRow {
            timeframe: Timeframe::M5,
            threshold: None,
            n: Some(1200.0),
            win_ratio: Some(0.5234),
            wilson_l: None,
            wilson_u: None,
            base_win_ratio: Some(0.5),
            lift_vs_base: Some(-0.01),
        }];
        let table = Table::complete(rows, &schema::SUMMARY);
        let refs: Vec<&SummaryRow> = table.rows.iter().collect();
        let view = build_summary_table(&table.presence, &refs);
        assert_eq!(view.columns.len(), 8);
        assert_eq!(
            view.rows[0],
            vec!["5m", "", "1200", "52.34%", "", "", "50.00%", "-1.00%"]
        );
    }
}
