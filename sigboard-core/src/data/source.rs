//! Sheet sources: where named tables come from.
//!
//! The [`SheetSource`] trait abstracts over a spreadsheet file (xlsx, xls,
//! ods via calamine), a directory holding one CSV or Parquet file per sheet,
//! and in-memory frames for tests. The workbook loader only talks to the
//! trait.

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::error::LoadError;

pub trait SheetSource {
    /// Human-readable description for logs and the status bar.
    fn describe(&self) -> String;

    /// Names of every sheet the source holds.
    fn sheet_names(&self) -> Vec<String>;

    fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }

    /// Read one sheet as a frame. The first spreadsheet row is the header.
    fn read_sheet(&mut self, name: &str) -> Result<DataFrame, LoadError>;
}

/// Open the right source for `path`: a directory of per-sheet files, or a
/// spreadsheet file.
pub fn open_source(path: &Path) -> Result<Box<dyn SheetSource>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        Ok(Box::new(FrameDirSource::open(path)?))
    } else {
        Ok(Box::new(SpreadsheetSource::open(path)?))
    }
}

// ── Spreadsheet files ──────────────────────────────────────────────

pub struct SpreadsheetSource {
    path: PathBuf,
    workbook: Sheets<BufReader<fs::File>>,
}

impl SpreadsheetSource {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let workbook = open_workbook_auto(path).map_err(|e| LoadError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
        })
    }
}

impl SheetSource for SpreadsheetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<DataFrame, LoadError> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| LoadError::Sheet {
                sheet: name.to_string(),
                reason: e.to_string(),
            })?;
        range_to_frame(name, &range)
    }
}

/// Convert a calamine cell range into a frame.
///
/// A column whose non-empty cells are all numeric becomes `Float64`; any other
/// column becomes `String`, with numbers rendered as text. Empty and error
/// cells become nulls.
fn range_to_frame(sheet: &str, range: &Range<Data>) -> Result<DataFrame, LoadError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| LoadError::EmptySheet {
        sheet: sheet.to_string(),
    })?;
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(j, cell)| match cell_text(cell) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("column_{j}"),
        })
        .collect();

    let body: Vec<&[Data]> = rows.collect();
    let mut columns = Vec::with_capacity(names.len());

    for (j, name) in names.iter().enumerate() {
        let cells: Vec<Option<&Data>> = body
            .iter()
            .map(|row| row.get(j).filter(|c| !is_blank(c)))
            .collect();

        let all_numeric = cells.iter().flatten().all(|c| cell_number(c).is_some());

        let column = if all_numeric {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|c| c.and_then(cell_number))
                .collect();
            Column::new(name.as_str().into(), values)
        } else {
            let values: Vec<Option<String>> =
                cells.iter().map(|c| c.and_then(cell_text)).collect();
            Column::new(name.as_str().into(), values)
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        other => Some(other.to_string()),
    }
}

// ── Per-sheet file directories ──────────────────────────────────────

/// Directory layout: `{dir}/{sheet}.csv` or `{dir}/{sheet}.parquet`.
pub struct FrameDirSource {
    dir: PathBuf,
    files: BTreeMap<String, PathBuf>,
}

impl FrameDirSource {
    pub fn open(dir: &Path) -> Result<Self, LoadError> {
        let mut files = BTreeMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("csv") | Some("parquet")) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.insert(stem.to_string(), path.clone());
            }
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }
}

impl SheetSource for FrameDirSource {
    fn describe(&self) -> String {
        format!("{}/", self.dir.display())
    }

    fn sheet_names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<DataFrame, LoadError> {
        let path = self.files.get(name).ok_or_else(|| LoadError::MissingSheet {
            sheet: name.to_string(),
        })?;

        let df = if path.extension().and_then(|e| e.to_str()) == Some("parquet") {
            let file = fs::File::open(path)?;
            ParquetReader::new(file).finish()?
        } else {
            CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path.clone()))?
                .finish()?
        };
        Ok(df)
    }
}

// ── In-memory ───────────────────────────────────────────────────────

/// Frames held in memory, keyed by sheet name.
#[derive(Default)]
pub struct MemorySource {
    sheets: BTreeMap<String, DataFrame>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, df: DataFrame) -> Self {
        self.sheets.insert(name.into(), df);
        self
    }
}

impl SheetSource for MemorySource {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<DataFrame, LoadError> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::MissingSheet {
                sheet: name.to_string(),
            })
    }
}
