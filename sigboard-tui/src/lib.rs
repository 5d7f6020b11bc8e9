//! SigBoard TUI: terminal dashboards over a signal-statistics workbook.
//!
//! Panels:
//! 1. Signals: chart of historical vs model probability per threshold, and the
//!    enriched table with confidence, regime and verdict columns
//! 2. Summary: per-timeframe summary sheets
//! 3. Help: keys and column glossary

pub mod app;
pub mod input;
pub mod logging;
pub mod panels;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::{AppState, Panel};
pub use theme::Theme;
