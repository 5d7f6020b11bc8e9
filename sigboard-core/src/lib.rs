//! SigBoard Core: workbook loading, enrichment, filtering, and view models.
//!
//! This crate holds everything the dashboards need below the rendering layer:
//! - Domain types (direction, condition, timeframe, threshold, verdicts, rows)
//! - Workbook loading from spreadsheets or per-sheet CSV/Parquet directories
//! - A read-through workbook cache keyed by path and modification time
//! - The enrichment pipeline (join, derive, classify)
//! - Row filtering by the user's selection
//! - Chart and table view models consumed by the TUI and CLI

pub mod config;
pub mod data;
pub mod domain;
pub mod enrich;
pub mod filter;
pub mod pipeline;
pub mod present;

pub use config::{ConfigError, DashboardConfig, SheetNames};
pub use data::{LoadError, Workbook, WorkbookCache};
pub use domain::{
    Condition, Confidence, Direction, EnrichedRow, JoinKey, SummaryVariant, Threshold, Timeframe,
    Verdict, VolatilityRegime,
};
pub use filter::{Selection, ThresholdChoice, TimeframeChoice};
pub use pipeline::{SignalsView, SummaryView};

#[cfg(test)]
mod tests {
    use super::*;

    /// The dashboards share loaded workbooks through `Arc`; these types must
    /// stay `Send + Sync`.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Workbook>();
        require_sync::<Workbook>();
        require_send::<WorkbookCache>();
        require_sync::<WorkbookCache>();
        require_send::<EnrichedRow>();
        require_sync::<EnrichedRow>();
        require_send::<Selection>();
        require_sync::<Selection>();
        require_send::<SignalsView>();
        require_sync::<SignalsView>();
        require_send::<SummaryView>();
        require_sync::<SummaryView>();
    }
}
