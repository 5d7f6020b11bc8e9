//! Ratatui widgets for the dashboards.

pub mod signal_chart;
pub mod signal_table;
pub mod summary_table;

pub use signal_chart::SignalChart;
pub use signal_table::SignalTable;
pub use summary_table::SummaryTable;
