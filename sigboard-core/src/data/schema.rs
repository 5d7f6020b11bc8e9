//! Table schemas with explicit optional columns.
//!
//! Each table declares its columns up front. Validation checks that every
//! required column exists and returns a [`ColumnPresence`] recording which
//! optional columns were found, so downstream code asks "was this column
//! present?" instead of probing the frame.

use polars::prelude::*;
use std::collections::BTreeSet;

/// Workbook column headers.
pub mod col {
    pub const DIRECTION: &str = "Direction";
    pub const CONDITION: &str = "Condition";
    pub const SIDE: &str = "Side";
    pub const TIMEFRAME: &str = "Timeframe";
    pub const THRESHOLD: &str = "Threshold";
    pub const ML_PRED_PROB: &str = "ML_Pred_Prob";
    pub const HISTORICAL_WIN_RATIO: &str = "Historical_Win_Ratio";
    pub const N: &str = "N";
    pub const PROB: &str = "Prob";
    pub const WILSON_L: &str = "Wilson_L";
    pub const WILSON_U: &str = "Wilson_U";
    pub const AVG_PROFIT_PCT: &str = "Avg_Profit_%";
    pub const MIN_PROFIT_PCT: &str = "Min_Profit_%";
    pub const MAX_PROFIT_PCT: &str = "Max_Profit_%";
    pub const STATUS: &str = "Status";
    pub const WIN_RATIO: &str = "Win_Ratio";
    pub const BASE_WIN_RATIO: &str = "Base_Win_Ratio";
    pub const LIFT_VS_BASE: &str = "Lift_vs_Base";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        required: false,
    }
}

/// Expected layout of one table.
#[derive(Debug, Clone, Copy)]
pub struct SheetSchema {
    pub columns: &'static [ColumnSpec],
}

use ColumnKind::{Number, Text};

pub const PREDICTIONS: SheetSchema = SheetSchema {
    columns: &[
        required(col::DIRECTION, Text),
        required(col::CONDITION, Text),
        required(col::TIMEFRAME, Text),
        required(col::THRESHOLD, Number),
        required(col::ML_PRED_PROB, Number),
        required(col::HISTORICAL_WIN_RATIO, Number),
    ],
};

pub const CONFIDENCE_INTERVALS: SheetSchema = SheetSchema {
    columns: &[
        required(col::SIDE, Text),
        required(col::TIMEFRAME, Text),
        required(col::THRESHOLD, Number),
        required(col::N, Number),
        optional(col::PROB, Number),
        optional(col::WILSON_L, Number),
        optional(col::WILSON_U, Number),
    ],
};

pub const DESCRIPTIVE: SheetSchema = SheetSchema {
    columns: &[
        required(col::DIRECTION, Text),
        required(col::CONDITION, Text),
        required(col::TIMEFRAME, Text),
        required(col::THRESHOLD, Number),
        required(col::N, Number),
        optional(col::AVG_PROFIT_PCT, Number),
        optional(col::MIN_PROFIT_PCT, Number),
        optional(col::MAX_PROFIT_PCT, Number),
        optional(col::STATUS, Text),
        optional(col::WIN_RATIO, Number),
    ],
};

pub const SUMMARY: SheetSchema = SheetSchema {
    columns: &[
        required(col::TIMEFRAME, Text),
        optional(col::THRESHOLD, Number),
        optional(col::N, Number),
        optional(col::WIN_RATIO, Number),
        optional(col::WILSON_L, Number),
        optional(col::WILSON_U, Number),
        optional(col::BASE_WIN_RATIO, Number),
        optional(col::LIFT_VS_BASE, Number),
    ],
};

/// Which schema columns a loaded table actually has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPresence(BTreeSet<&'static str>);

impl ColumnPresence {
    pub fn has(&self, column: &str) -> bool {
        self.0.contains(column)
    }

    /// Presence set with every column of `schema`, for tables built in code.
    pub fn all(schema: &SheetSchema) -> Self {
        Self(schema.columns.iter().map(|c| c.name).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl SheetSchema {
    /// Validate a frame against this schema.
    pub fn validate(&self, sheet: &str, df: &DataFrame) -> Result<ColumnPresence, SchemaError> {
        let mut present = BTreeSet::new();

        for spec in self.columns {
            let column = match df.column(spec.name) {
                Ok(column) => column,
                Err(_) if spec.required => {
                    return Err(SchemaError::MissingColumn {
                        sheet: sheet.to_string(),
                        column: spec.name.to_string(),
                    });
                }
                Err(_) => continue,
            };

            if spec.kind == ColumnKind::Number
                && matches!(column.dtype(), DataType::Boolean | DataType::Date)
            {
                return Err(SchemaError::TypeMismatch {
                    sheet: sheet.to_string(),
                    column: spec.name.to_string(),
                    actual: column.dtype().clone(),
                });
            }

            present.insert(spec.name);
        }

        Ok(ColumnPresence(present))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet '{sheet}', column '{column}': expected numbers, got {actual:?}")]
    TypeMismatch {
        sheet: String,
        column: String,
        actual: DataType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictions_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Direction".into(), &["Buy"]),
            Column::new("Condition".into(), &["above"]),
            Column::new("Timeframe".into(), &["1h"]),
            Column::new("Threshold".into(), &[1.0]),
            Column::new("ML_Pred_Prob".into(), &[0.6]),
            Column::new("Historical_Win_Ratio".into(), &[0.5]),
        ])
        .unwrap()
    }

    #[test]
    fn valid_predictions_frame_passes() {
        let presence = PREDICTIONS.validate("ML", &predictions_frame()).unwrap();
        assert!(presence.has(col::ML_PRED_PROB));
        assert_eq!(presence.len(), PREDICTIONS.columns.len());
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let df = predictions_frame().drop("ML_Pred_Prob").unwrap();
        let err = PREDICTIONS.validate("ML", &df).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingColumn { ref column, .. } if column == "ML_Pred_Prob"
        ));
    }

    #[test]
    fn optional_columns_are_recorded_as_absent() {
        let df = DataFrame::new(vec![
            Column::new("Side".into(), &["above"]),
            Column::new("Timeframe".into(), &["1h"]),
            Column::new("Threshold".into(), &[1.0]),
            Column::new("N".into(), &[500.0]),
            Column::new("Prob".into(), &[0.55]),
        ])
        .unwrap();
        let presence = CONFIDENCE_INTERVALS.validate("CI", &df).unwrap();
        assert!(presence.has(col::PROB));
        assert!(!presence.has(col::WILSON_L));
        assert!(!presence.has(col::WILSON_U));
    }

    #[test]
    fn boolean_number_column_is_type_mismatch() {
        let df = DataFrame::new(vec![
            Column::new("Timeframe".into(), &["1h"]),
            Column::new("N".into(), &[true]),
        ])
        .unwrap();
        let err = SUMMARY.validate("S", &df).unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }
}
