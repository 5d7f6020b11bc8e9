//! The loaded workbook: one mandatory predictions table plus optional
//! confidence-interval, descriptive and summary tables.

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::convert::{
    confidence_intervals_from_frame, descriptive_from_frame, predictions_from_frame,
    summary_from_frame,
};
use super::error::LoadError;
use super::schema::{self, ColumnPresence, SheetSchema};
use super::source::SheetSource;
use crate::config::SheetNames;
use crate::domain::{
    ConfidenceIntervalRow, DescriptiveRow, Direction, PredictionRow, SummaryRow, SummaryVariant,
};

/// Rows of one table plus the schema columns it actually had.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    pub rows: Vec<R>,
    pub presence: ColumnPresence,
}

impl<R> Table<R> {
    pub fn new(rows: Vec<R>, presence: ColumnPresence) -> Self {
        Self { rows, presence }
    }

    /// Table built in code with every schema column present.
    pub fn complete(rows: Vec<R>, schema: &SheetSchema) -> Self {
        Self::new(rows, ColumnPresence::all(schema))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    /// Where the workbook came from, for display.
    pub source: String,
    pub predictions: Table<PredictionRow>,
    pub ci_buy: Option<Table<ConfidenceIntervalRow>>,
    pub ci_sell: Option<Table<ConfidenceIntervalRow>>,
    pub descriptive: Option<Table<DescriptiveRow>>,
    pub summaries: BTreeMap<SummaryVariant, Table<SummaryRow>>,
}

impl Workbook {
    /// A workbook holding only predictions.
    pub fn from_predictions(rows: Vec<PredictionRow>) -> Self {
        Self {
            source: "<memory>".to_string(),
            predictions: Table::complete(rows, &schema::PREDICTIONS),
            ci_buy: None,
            ci_sell: None,
            descriptive: None,
            summaries: BTreeMap::new(),
        }
    }

    pub fn confidence_intervals(&self, direction: Direction) -> Option<&Table<ConfidenceIntervalRow>> {
        match direction {
            Direction::Buy => self.ci_buy.as_ref(),
            Direction::Sell => self.ci_sell.as_ref(),
        }
    }

    pub fn summary(&self, variant: SummaryVariant) -> Option<&Table<SummaryRow>> {
        self.summaries.get(&variant)
    }

    /// One line per table: name and row count, or "absent".
    pub fn describe_tables(&self, names: &SheetNames) -> Vec<(String, Option<usize>)> {
        let mut out = vec![
            (names.predictions.clone(), Some(self.predictions.len())),
            (names.ci_buy.clone(), self.ci_buy.as_ref().map(Table::len)),
            (names.ci_sell.clone(), self.ci_sell.as_ref().map(Table::len)),
            (names.descriptive.clone(), self.descriptive.as_ref().map(Table::len)),
        ];
        for variant in SummaryVariant::ALL {
            out.push((
                names.summary(variant).to_string(),
                self.summaries.get(&variant).map(Table::len),
            ));
        }
        out
    }
}

/// Load every table named in `names` from `source`.
///
/// The predictions sheet is mandatory. Other sheets are optional: when absent
/// they load as `None` (or are left out of `summaries`). A sheet that is
/// present but malformed is an error either way.
pub fn load_workbook(
    source: &mut dyn SheetSource,
    names: &SheetNames,
) -> Result<Workbook, LoadError> {
    if !source.has_sheet(&names.predictions) {
        return Err(LoadError::MissingSheet {
            sheet: names.predictions.clone(),
        });
    }

    let df = source.read_sheet(&names.predictions)?;
    let presence = schema::PREDICTIONS.validate(&names.predictions, &df)?;
    let predictions = Table::new(predictions_from_frame(&names.predictions, &df)?, presence);

    let mut load_ci = |sheet: &str| -> Result<Option<Table<ConfidenceIntervalRow>>, LoadError> {
        if !source.has_sheet(sheet) {
            debug!(sheet, "optional confidence-interval sheet absent");
            return Ok(None);
        }
        let df = source.read_sheet(sheet)?;
        let presence = schema::CONFIDENCE_INTERVALS.validate(sheet, &df)?;
        Ok(Some(Table::new(
            confidence_intervals_from_frame(sheet, &df)?,
            presence,
        )))
    };
    let ci_buy = load_ci(&names.ci_buy)?;
    let ci_sell = load_ci(&names.ci_sell)?;

    let descriptive = if source.has_sheet(&names.descriptive) {
        let df = source.read_sheet(&names.descriptive)?;
        let presence = schema::DESCRIPTIVE.validate(&names.descriptive, &df)?;
        Some(Table::new(
            descriptive_from_frame(&names.descriptive, &df)?,
            presence,
        ))
    } else {
        debug!(sheet = %names.descriptive, "optional descriptive sheet absent");
        None
    };

    let mut summaries = BTreeMap::new();
    for variant in SummaryVariant::ALL {
        let sheet = names.summary(variant);
        if !source.has_sheet(sheet) {
            continue;
        }
        let df = source.read_sheet(sheet)?;
        let presence = schema::SUMMARY.validate(sheet, &df)?;
        summaries.insert(variant, Table::new(summary_from_frame(sheet, &df)?, presence));
    }

    let workbook = Workbook {
        source: source.describe(),
        predictions,
        ci_buy,
        ci_sell,
        descriptive,
        summaries,
    };

    info!(
        source = %workbook.source,
        predictions = workbook.predictions.len(),
        ci_buy = workbook.ci_buy.is_some(),
        ci_sell = workbook.ci_sell.is_some(),
        descriptive = workbook.descriptive.is_some(),
        summaries = workbook.summaries.len(),
        "workbook loaded"
    );

    Ok(workbook)
}
