//! Domain types for the signal dashboards

pub mod labels;
pub mod rows;
pub mod side;
pub mod threshold;
pub mod timeframe;

pub use labels::{Confidence, Verdict, VolatilityRegime};
pub use rows::{
    CiMatch, ConfidenceIntervalRow, DescriptiveMatch, DescriptiveRow, EnrichedRow, JoinKey,
    PredictionRow, SummaryRow,
};
pub use side::{Condition, Direction, SideParseError, SummaryVariant};
pub use threshold::Threshold;
pub use timeframe::Timeframe;
