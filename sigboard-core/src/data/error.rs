//! Structured error types for workbook loading.
//!
//! Every variant is fatal: a missing or malformed mandatory table stops the
//! pass before anything is rendered. Missing *optional* tables never produce
//! an error; they load as `None`.

use std::path::PathBuf;
use thiserror::Error;

use super::schema::SchemaError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("workbook not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open workbook {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    #[error("required sheet '{sheet}' is missing from the workbook")]
    MissingSheet { sheet: String },

    #[error("sheet '{sheet}' is empty (no header row)")]
    EmptySheet { sheet: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("sheet '{sheet}', column '{column}', row {row}: cannot read '{value}' ({reason})")]
    MalformedCell {
        sheet: String,
        column: String,
        /// 1-based spreadsheet row, counting the header as row 1.
        row: usize,
        value: String,
        reason: String,
    },

    #[error("sheet '{sheet}': {reason}")]
    Sheet { sheet: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

impl LoadError {
    /// Spreadsheet row number for a zero-based data row index.
    pub fn sheet_row(index: usize) -> usize {
        index + 2
    }
}
