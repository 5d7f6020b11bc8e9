//! Workbook loading and caching

pub mod cache;
pub mod convert;
pub mod error;
pub mod schema;
pub mod source;
pub mod workbook;

pub use cache::{CacheLookup, WorkbookCache};
pub use error::LoadError;
pub use schema::{ColumnKind, ColumnPresence, ColumnSpec, SchemaError, SheetSchema};
pub use source::{open_source, FrameDirSource, MemorySource, SheetSource, SpreadsheetSource};
pub use workbook::{load_workbook, Table, Workbook};
