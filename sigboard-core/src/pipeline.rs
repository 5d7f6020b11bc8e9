//! One load-and-render pass: enrich, filter, and build the view models.

use tracing::debug;

use crate::data::Workbook;
use crate::domain::{SummaryVariant, Threshold, Timeframe};
use crate::enrich::enrich;
use crate::filter::{available_thresholds, available_timeframes, filter_summary, Selection, TimeframeChoice};
use crate::present::{build_chart, build_summary_table, build_table, ChartView, ColorMap, SummaryTableView, TableView};

/// Everything the signals dashboard draws for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalsView {
    pub chart: ChartView,
    pub table: TableView,
    /// Distinct thresholds in the predictions, for the threshold selector.
    pub thresholds: Vec<Threshold>,
    /// Rows before the threshold and verdict filters.
    pub enriched_rows: usize,
    pub ci_joined: bool,
    pub descriptive_joined: bool,
}

impl SignalsView {
    pub fn build(workbook: &Workbook, selection: &Selection, colors: &ColorMap) -> Self {
        let enrichment = enrich(workbook, &selection.request());
        let enriched_rows = enrichment.rows.len();
        let rows = selection.apply(enrichment.rows.clone());

        debug!(
            direction = %selection.direction,
            condition = %selection.condition,
            threshold = %selection.threshold.label(),
            enriched = enriched_rows,
            shown = rows.len(),
            "signals view built"
        );

        Self {
            chart: build_chart(
                &rows,
                selection.direction,
                selection.condition,
                selection.threshold,
                selection.show_ci,
                colors,
            ),
            table: build_table(&enrichment, &rows),
            thresholds: available_thresholds(&workbook.predictions.rows),
            enriched_rows,
            ci_joined: enrichment.ci_joined(),
            descriptive_joined: enrichment.descriptive_joined(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// One summary variant's table, or `None` when the workbook lacks that sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub variant: SummaryVariant,
    pub timeframe: TimeframeChoice,
    pub timeframes: Vec<Timeframe>,
    pub table: Option<SummaryTableView>,
}

impl SummaryView {
    pub fn build(workbook: &Workbook, variant: SummaryVariant, timeframe: &TimeframeChoice) -> Self {
        let Some(sheet) = workbook.summary(variant) else {
            debug!(%variant, "summary sheet absent");
            return Self {
                variant,
                timeframe: timeframe.clone(),
                timeframes: Vec::new(),
                table: None,
            };
        };

        let rows = filter_summary(&sheet.rows, timeframe);
        Self {
            variant,
            timeframe: timeframe.clone(),
            timeframes: available_timeframes(&sheet.rows),
            table: Some(build_summary_table(&sheet.presence, &rows)),
        }
    }
}
