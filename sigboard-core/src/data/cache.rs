//! Read-through workbook cache.
//!
//! Entries are keyed by the workbook path and validated against its
//! modification time (for per-sheet directories: the newest file inside). A
//! lookup whose stored mtime or sheet names differ from the current ones is
//! stale and reloads.
//!
//! The cache is an explicit value owned by the caller; there is no process-wide
//! state.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

use super::error::LoadError;
use super::source::open_source;
use super::workbook::{load_workbook, Workbook};
use crate::config::SheetNames;

/// Outcome of the most recent lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    Hit,
    Miss,
    Stale,
}

struct CacheEntry {
    modified: SystemTime,
    sheets: SheetNames,
    workbook: Arc<Workbook>,
    loaded_at: NaiveDateTime,
}

#[derive(Default)]
pub struct WorkbookCache {
    entries: HashMap<PathBuf, CacheEntry>,
    last_lookup: Option<CacheLookup>,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached workbook for `path`, loading it if absent or stale.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        sheets: &SheetNames,
    ) -> Result<Arc<Workbook>, LoadError> {
        let modified = source_modified(path)?;

        let lookup = match self.entries.get(path) {
            Some(entry) if entry.modified == modified && entry.sheets == *sheets => {
                CacheLookup::Hit
            }
            Some(_) => CacheLookup::Stale,
            None => CacheLookup::Miss,
        };
        self.last_lookup = Some(lookup);

        if lookup == CacheLookup::Hit {
            debug!(path = %path.display(), "workbook cache hit");
            if let Some(entry) = self.entries.get(path) {
                return Ok(Arc::clone(&entry.workbook));
            }
        }

        info!(path = %path.display(), ?lookup, "loading workbook");
        let mut source = open_source(path)?;
        let workbook = Arc::new(load_workbook(source.as_mut(), sheets)?);

        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                sheets: sheets.clone(),
                workbook: Arc::clone(&workbook),
                loaded_at: chrono::Local::now().naive_local(),
            },
        );
        Ok(workbook)
    }

    /// Drop the entry for `path`. Returns true if one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let removed = self.entries.remove(path).is_some();
        if removed {
            debug!(path = %path.display(), "workbook cache entry invalidated");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_lookup = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_lookup(&self) -> Option<CacheLookup> {
        self.last_lookup
    }

    /// When the cached copy of `path` was loaded.
    pub fn loaded_at(&self, path: &Path) -> Option<NaiveDateTime> {
        self.entries.get(path).map(|e| e.loaded_at)
    }
}

/// Modification time of a workbook file, or the newest file in a directory.
fn source_modified(path: &Path) -> Result<SystemTime, LoadError> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;

    if !meta.is_dir() {
        return Ok(meta.modified()?);
    }

    let mut newest = meta.modified()?;
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let modified = entry.metadata()?.modified()?;
        if modified > newest {
            newest = modified;
        }
    }
    Ok(newest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const PREDICTIONS_CSV: &str = "\
Direction,Condition,Timeframe,Threshold,ML_Pred_Prob,Historical_Win_Ratio
Buy,above,1h,1.0,0.6,0.5
";

    fn workbook_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ML_Predictions_All.csv"), PREDICTIONS_CSV).unwrap();
        dir
    }

    fn touch(path: &Path, offset_secs: u64) {
        let file = fs::OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(offset_secs))
            .unwrap();
    }

    #[test]
    fn second_lookup_is_a_hit_returning_same_workbook() {
        let dir = workbook_dir();
        let mut cache = WorkbookCache::new();
        let names = SheetNames::default();

        let first = cache.get_or_load(dir.path(), &names).unwrap();
        assert_eq!(cache.last_lookup(), Some(CacheLookup::Miss));
        let second = cache.get_or_load(dir.path(), &names).unwrap();
        assert_eq!(cache.last_lookup(), Some(CacheLookup::Hit));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.loaded_at(dir.path()).is_some());
    }

    #[test]
    fn newer_mtime_reloads() {
        let dir = workbook_dir();
        let mut cache = WorkbookCache::new();
        let names = SheetNames::default();

        let first = cache.get_or_load(dir.path(), &names).unwrap();

        let csv = dir.path().join("ML_Predictions_All.csv");
        fs::write(
            &csv,
            format!("{PREDICTIONS_CSV}Sell,below,5m,0.5,0.4,0.45\n"),
        )
        .unwrap();
        touch(&csv, 60);

        let second = cache.get_or_load(dir.path(), &names).unwrap();
        assert_eq!(cache.last_lookup(), Some(CacheLookup::Stale));
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.predictions.len(), 2);
    }

    #[test]
    fn changed_sheet_names_reload() {
        let dir = workbook_dir();
        let mut cache = WorkbookCache::new();
        cache.get_or_load(dir.path(), &SheetNames::default()).unwrap();

        let mut names = SheetNames::default();
        names.descriptive = "Other_Descriptive".into();
        cache.get_or_load(dir.path(), &names).unwrap();
        assert_eq!(cache.last_lookup(), Some(CacheLookup::Stale));
    }

    #[test]
    fn invalidate_forces_miss() {
        let dir = workbook_dir();
        let mut cache = WorkbookCache::new();
        let names = SheetNames::default();
        cache.get_or_load(dir.path(), &names).unwrap();

        assert!(cache.invalidate(dir.path()));
        assert!(!cache.invalidate(dir.path()));
        cache.get_or_load(dir.path(), &names).unwrap();
        assert_eq!(cache.last_lookup(), Some(CacheLookup::Miss));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_workbook_is_not_found() {
        let mut cache = WorkbookCache::new();
        let err = cache
            .get_or_load(Path::new("/nonexistent/data2.xlsx"), &SheetNames::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(cache.is_empty());
    }
}
