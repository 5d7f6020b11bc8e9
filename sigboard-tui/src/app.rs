//! Application state. Single owner, main thread only.
//!
//! The workbook cache lives here; every selection change re-runs
//! enrich → filter → view models over the cached workbook.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use sigboard_core::filter::available_thresholds;
use sigboard_core::present::ColorMap;
use sigboard_core::{
    DashboardConfig, Selection, SignalsView, SummaryVariant, SummaryView, ThresholdChoice,
    TimeframeChoice, Workbook, WorkbookCache,
};

use crate::theme::Theme;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Signals,
    Summary,
    Help,
}

impl Panel {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Panel::Signals => 0,
            Panel::Summary => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Signals),
            1 => Some(Panel::Summary),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Signals => "Signals",
            Panel::Summary => "Summary",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Signals)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Signals)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level application state.
pub struct AppState {
    pub active_panel: Panel,
    pub running: bool,
    pub theme: Theme,

    pub workbook_path: PathBuf,
    pub config: DashboardConfig,
    pub colors: ColorMap,
    pub cache: WorkbookCache,
    pub workbook: Option<Arc<Workbook>>,
    pub loaded_at: Option<NaiveDateTime>,
    /// Set when the last load failed; the UI shows only the error.
    pub load_error: Option<String>,

    pub selection: Selection,
    pub summary_variant: SummaryVariant,
    pub summary_timeframe: TimeframeChoice,
    pub signals: Option<SignalsView>,
    pub summary: Option<SummaryView>,
    pub table_scroll: usize,

    pub status_message: Option<(String, StatusLevel)>,

    /// Select the lowest threshold on the first successful load. Cleared once
    /// a saved selection has been restored.
    pub pick_first_threshold: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig, colors: ColorMap, workbook_path: PathBuf) -> Self {
        Self {
            active_panel: Panel::Signals,
            running: true,
            theme: Theme::default(),
            workbook_path,
            config,
            colors,
            cache: WorkbookCache::new(),
            workbook: None,
            loaded_at: None,
            load_error: None,
            selection: Selection::default(),
            summary_variant: SummaryVariant::ALL[0],
            summary_timeframe: TimeframeChoice::All,
            signals: None,
            summary: None,
            table_scroll: 0,
            status_message: None,
            pick_first_threshold: true,
        }
    }

    /// State over an already-loaded workbook, bypassing the cache.
    pub fn with_workbook(config: DashboardConfig, colors: ColorMap, workbook: Workbook) -> Self {
        let path = PathBuf::from(&workbook.source);
        let mut app = Self::new(config, colors, path);
        app.workbook = Some(Arc::new(workbook));
        app.refresh();
        app
    }

    /// Load (or fetch from the cache) the workbook and rebuild the views.
    pub fn load(&mut self) {
        match self.cache.get_or_load(&self.workbook_path, &self.config.sheets) {
            Ok(workbook) => {
                if self.pick_first_threshold {
                    self.pick_first_threshold = false;
                    if let Some(first) = available_thresholds(&workbook.predictions.rows).first() {
                        self.selection.threshold = ThresholdChoice::Only(*first);
                    }
                }
                self.loaded_at = self.cache.loaded_at(&self.workbook_path);
                self.workbook = Some(workbook);
                self.load_error = None;
                self.refresh();
            }
            Err(err) => {
                let message = error_chain(&err);
                error!(path = %self.workbook_path.display(), error = %message, "workbook load failed");
                self.workbook = None;
                self.signals = None;
                self.summary = None;
                self.load_error = Some(message);
                self.set_error("Load failed; fix the workbook and press r");
            }
        }
    }

    /// Drop the cached copy and load again from disk.
    pub fn reload(&mut self) {
        self.cache.invalidate(&self.workbook_path);
        self.load();
        if self.load_error.is_none() {
            info!(path = %self.workbook_path.display(), "workbook reloaded");
            self.set_status(format!("Reloaded {}", self.workbook_path.display()));
        }
    }

    /// Recompute both views from the current workbook and selections.
    pub fn refresh(&mut self) {
        let Some(workbook) = self.workbook.as_ref() else {
            return;
        };

        let signals = SignalsView::build(workbook, &self.selection, &self.colors);
        let summary = SummaryView::build(workbook, self.summary_variant, &self.summary_timeframe);

        if signals.is_empty() {
            self.set_warning("No rows match the current selection");
        } else if !self.selection.show_ci || signals.ci_joined {
            self.status_message = None;
        } else {
            self.set_warning(format!(
                "No {} sheet; intervals hidden",
                self.config.sheets.ci(self.selection.direction)
            ));
        }

        let rows = signals.table.rows.len();
        self.table_scroll = self.table_scroll.min(rows.saturating_sub(1));
        self.signals = Some(signals);
        self.summary = Some(summary);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

/// Error message followed by its sources, one per line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\n  caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigboard_core::domain::{Condition, Direction, PredictionRow, Threshold, Timeframe};

    fn workbook() -> Workbook {
        Workbook::from_predictions(vec![PredictionRow {
            direction: Direction::Buy,
            condition: Condition::Above,
            timeframe: Timeframe::H1,
            threshold: Threshold::from_f64(1.0).unwrap(),
            ml_pred_prob: Some(0.6),
            historical_win_ratio: Some(0.5),
        }])
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Signals.next(), Panel::Summary);
        assert_eq!(Panel::Help.next(), Panel::Signals);
        assert_eq!(Panel::Signals.prev(), Panel::Help);
        for i in 0..Panel::COUNT {
            assert_eq!(Panel::from_index(i).unwrap().index(), i);
        }
        assert!(Panel::from_index(Panel::COUNT).is_none());
    }

    #[test]
    fn with_workbook_builds_views() {
        let app = AppState::with_workbook(DashboardConfig::default(), ColorMap::default(), workbook());
        let signals = app.signals.as_ref().unwrap();
        assert_eq!(signals.table.rows.len(), 1);
        assert!(app.summary.as_ref().unwrap().table.is_none());
    }

    #[test]
    fn empty_selection_sets_warning() {
        let mut app = AppState::with_workbook(DashboardConfig::default(), ColorMap::default(), workbook());
        app.selection.direction = Direction::Sell;
        app.refresh();
        assert!(app.signals.as_ref().unwrap().is_empty());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    const PREDICTIONS_CSV: &str = "\
Direction,Condition,Timeframe,Threshold,ML_Pred_Prob,Historical_Win_Ratio
Buy,above,1h,1.5,0.6,0.5
Buy,above,1h,0.5,0.55,0.5
Buy,above,5m,1.0,0.52,0.5
";

    fn workbook_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ML_Predictions_All.csv"), PREDICTIONS_CSV).unwrap();
        dir
    }

    #[test]
    fn first_load_selects_lowest_threshold() {
        let dir = workbook_dir();
        let mut app = AppState::new(
            DashboardConfig::default(),
            ColorMap::default(),
            dir.path().to_path_buf(),
        );
        app.load();
        assert_eq!(
            app.selection.threshold,
            ThresholdChoice::Only(Threshold::from_f64(0.5).unwrap())
        );
        assert_eq!(app.signals.as_ref().unwrap().table.rows.len(), 1);

        // A reload keeps whatever the user has chosen since.
        app.selection.threshold = ThresholdChoice::All;
        app.reload();
        assert_eq!(app.selection.threshold, ThresholdChoice::All);
    }

    #[test]
    fn restored_selection_is_kept_on_first_load() {
        let dir = workbook_dir();
        let mut app = AppState::new(
            DashboardConfig::default(),
            ColorMap::default(),
            dir.path().to_path_buf(),
        );
        let mut saved = crate::persistence::PersistedState::default();
        saved.selection.threshold = ThresholdChoice::All;
        crate::persistence::apply(&mut app, saved);
        app.load();
        assert_eq!(app.selection.threshold, ThresholdChoice::All);
        assert_eq!(app.signals.as_ref().unwrap().table.rows.len(), 3);
    }

    #[test]
    fn missing_workbook_records_load_error() {
        let mut app = AppState::new(
            DashboardConfig::default(),
            ColorMap::default(),
            PathBuf::from("/nonexistent/data2.xlsx"),
        );
        app.load();
        assert!(app.workbook.is_none());
        assert!(app.load_error.as_ref().unwrap().contains("not found"));
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));
    }
}
