//! Chart view model: historical ratio and model probability per threshold,
//! plotted over the fixed timeframe order.

use std::collections::BTreeSet;

use super::color::{ColorMap, SeriesColor};
use crate::domain::{Condition, Direction, EnrichedRow, Threshold, Timeframe};
use crate::filter::ThresholdChoice;

/// A point on the timeframe axis. `x` is the timeframe's rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: usize,
    pub y: f64,
}

/// Asymmetric error bar measured from the interval's point estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBar {
    pub x: usize,
    pub upper: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<ChartPoint>,
    /// Present only on the historical series while intervals are shown.
    pub error_bars: Vec<ErrorBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPair {
    pub threshold: Threshold,
    pub color: SeriesColor,
    pub historical: Series,
    pub model: Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub x_labels: Vec<String>,
    pub y_range: (f64, f64),
    pub series: Vec<SeriesPair>,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

pub fn chart_title(direction: Direction, condition: Condition, threshold: ThresholdChoice) -> String {
    match threshold {
        ThresholdChoice::All => format!("{direction} — {condition} (all thresholds)"),
        ThresholdChoice::Only(t) => format!("{direction} — {condition} (threshold {t})"),
    }
}

/// Build the chart from already-filtered rows.
///
/// One series pair per threshold that still has rows; thresholds are taken in
/// ascending order. Rows whose timeframe is out-of-band have no x position and
/// are left off the chart.
pub fn build_chart(
    rows: &[EnrichedRow],
    direction: Direction,
    condition: Condition,
    threshold: ThresholdChoice,
    show_ci: bool,
    colors: &ColorMap,
) -> ChartView {
    let thresholds: BTreeSet<Threshold> = rows
        .iter()
        .map(|r| r.threshold())
        .filter(|t| threshold.admits(*t))
        .collect();

    let series = thresholds
        .into_iter()
        .filter_map(|t| series_pair(rows, t, show_ci, colors))
        .collect();

    ChartView {
        title: chart_title(direction, condition, threshold),
        x_labels: Timeframe::ORDER.iter().map(|tf| tf.label().to_string()).collect(),
        y_range: (0.0, 1.0),
        series,
    }
}

fn series_pair(
    rows: &[EnrichedRow],
    threshold: Threshold,
    show_ci: bool,
    colors: &ColorMap,
) -> Option<SeriesPair> {
    let mut placed: Vec<(usize, &EnrichedRow)> = rows
        .iter()
        .filter(|r| r.threshold() == threshold)
        .filter_map(|r| r.timeframe().rank().map(|x| (x, r)))
        .collect();
    if placed.is_empty() {
        return None;
    }
    placed.sort_by_key(|(x, _)| *x);

    let points = |value: fn(&EnrichedRow) -> Option<f64>| -> Vec<ChartPoint> {
        placed
            .iter()
            .filter_map(|(x, r)| value(*r).filter(|y| y.is_finite()).map(|y| ChartPoint { x: *x, y }))
            .collect()
    };

    let error_bars = if show_ci {
        placed
            .iter()
            .filter_map(|(x, r)| {
                let ci = r.ci?;
                let (prob, low, high) = (ci.prob?, ci.wilson_l?, ci.wilson_u?);
                Some(ErrorBar {
                    x: *x,
                    upper: (high - prob).max(0.0),
                    lower: (prob - low).max(0.0),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    Some(SeriesPair {
        threshold,
        color: colors.color_for(threshold),
        historical: Series {
            name: format!("Hist {threshold}"),
            points: points(|r| r.prediction.historical_win_ratio),
            error_bars,
        },
        model: Series {
            name: format!("ML {threshold}"),
            points: points(|r| r.prediction.ml_pred_prob),
            error_bars: Vec::new(),
        },
    })
}
