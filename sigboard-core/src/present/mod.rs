//! View models consumed by the renderers. Nothing here knows about terminals.

pub mod chart;
pub mod color;
pub mod format;
pub mod table;

pub use chart::{build_chart, chart_title, ChartPoint, ChartView, ErrorBar, Series, SeriesPair};
pub use color::{ColorMap, SeriesColor};
pub use table::{
    build_summary_table, build_table, SignalColumn, SummaryColumn, SummaryTableView, TableRow,
    TableView,
};
