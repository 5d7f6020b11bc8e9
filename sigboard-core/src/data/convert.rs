//! Frame → typed row conversion.
//!
//! Numeric columns accept any numeric dtype (cast to `Float64`) or text that
//! parses as a number; empty text is null. Anything else is a malformed cell,
//! reported with its sheet, column and spreadsheet row.

use polars::prelude::*;
use tracing::debug;

use super::error::LoadError;
use super::schema::col;
use crate::domain::{
    Condition, ConfidenceIntervalRow, DescriptiveRow, Direction, PredictionRow, SummaryRow,
    Threshold, Timeframe,
};

/// Column accessor bound to one sheet.
pub struct FrameReader<'a> {
    sheet: &'a str,
    df: &'a DataFrame,
}

impl<'a> FrameReader<'a> {
    pub fn new(sheet: &'a str, df: &'a DataFrame) -> Self {
        Self { sheet, df }
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Numeric values of `name`; all-null when the column is absent.
    pub fn numbers(&self, name: &str) -> Result<Vec<Option<f64>>, LoadError> {
        let column = match self.df.column(name) {
            Ok(column) => column,
            Err(_) => return Ok(vec![None; self.height()]),
        };

        match column.dtype() {
            DataType::String => {
                let ca = column.str()?;
                ca.into_iter()
                    .enumerate()
                    .map(|(i, value)| self.parse_number(name, i, value))
                    .collect()
            }
            DataType::Null => Ok(vec![None; self.height()]),
            _ => {
                let cast = column.cast(&DataType::Float64)?;
                let ca = cast.f64()?;
                Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
            }
        }
    }

    /// Text values of `name`, trimmed, empty → null; all-null when absent.
    pub fn texts(&self, name: &str) -> Result<Vec<Option<String>>, LoadError> {
        let column = match self.df.column(name) {
            Ok(column) => column,
            Err(_) => return Ok(vec![None; self.height()]),
        };
        let cast = column.cast(&DataType::String)?;
        let ca = cast.str()?;
        Ok(ca
            .into_iter()
            .map(|v| {
                v.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect())
    }

    fn parse_number(
        &self,
        column: &str,
        index: usize,
        value: Option<&str>,
    ) -> Result<Option<f64>, LoadError> {
        let Some(text) = value.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        text.parse::<f64>()
            .map(|v| Some(v).filter(|x| !x.is_nan()))
            .map_err(|e| self.malformed(column, index, text, e.to_string()))
    }

    pub fn malformed(
        &self,
        column: &str,
        index: usize,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> LoadError {
        LoadError::MalformedCell {
            sheet: self.sheet.to_string(),
            column: column.to_string(),
            row: LoadError::sheet_row(index),
            value: value.into(),
            reason: reason.into(),
        }
    }

    fn threshold(&self, index: usize, value: f64) -> Result<Threshold, LoadError> {
        Threshold::from_f64(value).ok_or_else(|| {
            self.malformed(col::THRESHOLD, index, value.to_string(), "not a finite number")
        })
    }
}

/// Primary predictions sheet. Rows missing any key cell are skipped as blank.
pub fn predictions_from_frame(
    sheet: &str,
    df: &DataFrame,
) -> Result<Vec<PredictionRow>, LoadError> {
    let r = FrameReader::new(sheet, df);
    let directions = r.texts(col::DIRECTION)?;
    let conditions = r.texts(col::CONDITION)?;
    let timeframes = r.texts(col::TIMEFRAME)?;
    let thresholds = r.numbers(col::THRESHOLD)?;
    let ml = r.numbers(col::ML_PRED_PROB)?;
    let hist = r.numbers(col::HISTORICAL_WIN_RATIO)?;

    let mut rows = Vec::with_capacity(r.height());
    let mut skipped = 0usize;

    for i in 0..r.height() {
        let (Some(direction), Some(condition), Some(timeframe), Some(threshold)) = (
            directions[i].as_deref(),
            conditions[i].as_deref(),
            timeframes[i].as_deref(),
            thresholds[i],
        ) else {
            skipped += 1;
            continue;
        };

        let direction: Direction = direction
            .parse()
            .map_err(|e: crate::domain::SideParseError| {
                r.malformed(col::DIRECTION, i, direction, e.to_string())
            })?;
        let condition: Condition = condition
            .parse()
            .map_err(|e: crate::domain::SideParseError| {
                r.malformed(col::CONDITION, i, condition, e.to_string())
            })?;

        rows.push(PredictionRow {
            direction,
            condition,
            timeframe: Timeframe::parse(timeframe),
            threshold: r.threshold(i, threshold)?,
            ml_pred_prob: ml[i],
            historical_win_ratio: hist[i],
        });
    }

    if skipped > 0 {
        debug!(sheet, skipped, "skipped prediction rows with blank key cells");
    }
    Ok(rows)
}

/// Buy or sell confidence-interval sheet.
pub fn confidence_intervals_from_frame(
    sheet: &str,
    df: &DataFrame,
) -> Result<Vec<ConfidenceIntervalRow>, LoadError> {
    let r = FrameReader::new(sheet, df);
    let sides = r.texts(col::SIDE)?;
    let timeframes = r.texts(col::TIMEFRAME)?;
    let thresholds = r.numbers(col::THRESHOLD)?;
    let n = r.numbers(col::N)?;
    let prob = r.numbers(col::PROB)?;
    let lower = r.numbers(col::WILSON_L)?;
    let upper = r.numbers(col::WILSON_U)?;

    let mut rows = Vec::with_capacity(r.height());
    for i in 0..r.height() {
        let (Some(side), Some(timeframe), Some(threshold)) =
            (sides[i].as_ref(), timeframes[i].as_deref(), thresholds[i])
        else {
            continue;
        };
        rows.push(ConfidenceIntervalRow {
            side: side.clone(),
            timeframe: Timeframe::parse(timeframe),
            threshold: r.threshold(i, threshold)?,
            n: n[i],
            prob: prob[i],
            wilson_l: lower[i],
            wilson_u: upper[i],
        });
    }
    Ok(rows)
}

/// Descriptive-statistics sheet.
pub fn descriptive_from_frame(
    sheet: &str,
    df: &DataFrame,
) -> Result<Vec<DescriptiveRow>, LoadError> {
    let r = FrameReader::new(sheet, df);
    let directions = r.texts(col::DIRECTION)?;
    let conditions = r.texts(col::CONDITION)?;
    let timeframes = r.texts(col::TIMEFRAME)?;
    let thresholds = r.numbers(col::THRESHOLD)?;
    let n = r.numbers(col::N)?;
    let avg = r.numbers(col::AVG_PROFIT_PCT)?;
    let min = r.numbers(col::MIN_PROFIT_PCT)?;
    let max = r.numbers(col::MAX_PROFIT_PCT)?;
    let status = r.texts(col::STATUS)?;
    let win_ratio = r.numbers(col::WIN_RATIO)?;

    let mut rows = Vec::with_capacity(r.height());
    for i in 0..r.height() {
        let (Some(direction), Some(condition), Some(timeframe), Some(threshold)) = (
            directions[i].as_ref(),
            conditions[i].as_ref(),
            timeframes[i].as_deref(),
            thresholds[i],
        ) else {
            continue;
        };
        rows.push(DescriptiveRow {
            direction: direction.clone(),
            condition: condition.clone(),
            timeframe: Timeframe::parse(timeframe),
            threshold: r.threshold(i, threshold)?,
            n: n[i],
            avg_profit_pct: avg[i],
            min_profit_pct: min[i],
            max_profit_pct: max[i],
            status: status[i].clone(),
            win_ratio: win_ratio[i],
        });
    }
    Ok(rows)
}

/// Per-timeframe summary sheet.
pub fn summary_from_frame(sheet: &str, df: &DataFrame) -> Result<Vec<SummaryRow>, LoadError> {
    let r = FrameReader::new(sheet, df);
    let timeframes = r.texts(col::TIMEFRAME)?;
    let thresholds = r.numbers(col::THRESHOLD)?;
    let n = r.numbers(col::N)?;
    let win_ratio = r.numbers(col::WIN_RATIO)?;
    let lower = r.numbers(col::WILSON_L)?;
    let upper = r.numbers(col::WILSON_U)?;
    let base = r.numbers(col::BASE_WIN_RATIO)?;
    let lift = r.numbers(col::LIFT_VS_BASE)?;

    let mut rows = Vec::with_capacity(r.height());
    for i in 0..r.height() {
        let Some(timeframe) = timeframes[i].as_deref() else {
            continue;
        };
        let threshold = match thresholds[i] {
            Some(value) => Some(r.threshold(i, value)?),
            None => None,
        };
        rows.push(SummaryRow {
            timeframe: Timeframe::parse(timeframe),
            threshold,
            n: n[i],
            win_ratio: win_ratio[i],
            wilson_l: lower[i],
            wilson_u: upper[i],
            base_win_ratio: base[i],
            lift_vs_base: lift[i],
        });
    }
    Ok(rows)
}
