//! Dashboard state persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use sigboard_core::{Selection, SummaryVariant, TimeframeChoice};

use crate::app::{AppState, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub selection: Selection,
    pub active_panel: Panel,
    pub summary_variant: SummaryVariant,
    pub summary_timeframe: TimeframeChoice,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            active_panel: Panel::Signals,
            summary_variant: SummaryVariant::ALL[0],
            summary_timeframe: TimeframeChoice::All,
        }
    }
}

/// Load persisted state from disk. `None` if the file is missing or corrupt.
pub fn load(path: &Path) -> Option<PersistedState> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable dashboard state");
            None
        }
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        selection: app.selection.clone(),
        active_panel: app.active_panel,
        summary_variant: app.summary_variant,
        summary_timeframe: app.summary_timeframe.clone(),
    }
}

/// Apply persisted state. Call before the first load so views are built once.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.selection = state.selection;
    app.active_panel = state.active_panel;
    app.summary_variant = state.summary_variant;
    app.summary_timeframe = state.summary_timeframe;
    app.pick_first_threshold = false;
}
