//! End-to-end: a per-sheet CSV directory through load, enrich, filter and
//! the view models.

use std::fs;
use std::path::Path;

use sigboard_core::data::WorkbookCache;
use sigboard_core::present::ColorMap;
use sigboard_core::{
    Condition, Confidence, DashboardConfig, Direction, LoadError, Selection, SheetNames,
    SignalsView, SummaryVariant, SummaryView, Threshold, ThresholdChoice, TimeframeChoice,
    Verdict,
};

fn write(dir: &Path, sheet: &str, body: &str) {
    fs::write(dir.join(format!("{sheet}.csv")), body).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "ML_Predictions_All",
        "\
Direction,Condition,Timeframe,Threshold,ML_Pred_Prob,Historical_Win_Ratio
Buy,above,1h,1.0,0.6,0.5
Buy,above,5m,0.5,0.48,0.5
Buy,above,1h,1.5,0.55,0.54
Sell,below,1h,1.0,0.52,0.51
",
    );
    write(
        dir.path(),
        "Prob_Buy_with_Ratio",
        "\
Side,Timeframe,Threshold,N,Prob,Wilson_L,Wilson_U
above,1h,1.0,200,0.40,0.33,0.47
Above,1h,1.0,500,0.50,0.46,0.54
below,1h,1.0,900,0.51,0.49,0.53
",
    );
    write(
        dir.path(),
        "Descriptive_All",
        "\
Direction,Condition,Timeframe,Threshold,N,Avg_Profit_%,Min_Profit_%,Max_Profit_%,Status,Win_Ratio
Buy,above,1h,1.0,480,0.12,-2.5,3.1,ok,0.51
Buy,above,5m,0.5,1500,-0.2,-4.0,2.0,ok,0.47
",
    );
    write(
        dir.path(),
        "Summary_Buy_Above",
        "\
Timeframe,Threshold,N,Win_Ratio,Wilson_L,Wilson_U,Base_Win_Ratio,Lift_vs_Base
5m,0.5,1500,0.47,0.45,0.49,0.5,-0.03
1h,1.0,500,0.5,0.46,0.54,0.48,0.02
",
    );
    dir
}

#[test]
fn highest_n_ci_row_drives_confidence() {
    let dir = fixture();
    let mut cache = WorkbookCache::new();
    let wb = cache.get_or_load(dir.path(), &SheetNames::default()).unwrap();

    let selection = Selection {
        threshold: ThresholdChoice::Only(Threshold::from_f64(1.0).unwrap()),
        ..Selection::default()
    };
    let view = SignalsView::build(&wb, &selection, &DashboardConfig::default().color_map().unwrap());

    assert!(view.ci_joined);
    assert!(view.descriptive_joined);
    assert_eq!(view.table.rows.len(), 1);

    let headers = view.table.headers();
    let cell = |name: &str| {
        let idx = headers.iter().position(|h| *h == name).unwrap();
        view.table.rows[0].cells[idx].clone()
    };
    assert_eq!(cell("N"), "500");
    assert_eq!(cell("Confidence"), Confidence::Medium.label());
    assert_eq!(cell("Wilson_L"), "46.00%");
    assert_eq!(cell("Margin_of_Error"), "4.00%");
    assert_eq!(cell("Avg_Profit_%"), "0.12%");
    assert_eq!(cell("Signal_Strength"), "+10.00%");
    assert_eq!(cell("Verdict"), "Favourable");

    assert_eq!(view.chart.title, "Buy — above (threshold 1.0)");
    let bars = &view.chart.series[0].historical.error_bars;
    assert_eq!(bars.len(), 1);
}

#[test]
fn verdict_filter_and_all_thresholds() {
    let dir = fixture();
    let mut cache = WorkbookCache::new();
    let wb = cache.get_or_load(dir.path(), &SheetNames::default()).unwrap();

    let all = SignalsView::build(&wb, &Selection::default(), &ColorMap::default());
    assert_eq!(all.table.rows.len(), 3);
    assert_eq!(all.chart.series.len(), 3);

    // 5m/0.5: strength -0.02, avg -0.2 => Unfavourable.
    let mut selection = Selection::default();
    selection.verdicts = [Verdict::Unfavourable].into_iter().collect();
    let view = SignalsView::build(&wb, &selection, &ColorMap::default());
    assert_eq!(view.table.rows.len(), 1);
    assert_eq!(view.table.rows[0].verdict, Verdict::Unfavourable);
}

#[test]
fn sell_side_without_ci_sheet_omits_interval_columns() {
    let dir = fixture();
    let mut cache = WorkbookCache::new();
    let wb = cache.get_or_load(dir.path(), &SheetNames::default()).unwrap();

    let selection = Selection {
        direction: Direction::Sell,
        condition: Condition::Below,
        ..Selection::default()
    };
    let view = SignalsView::build(&wb, &selection, &ColorMap::default());
    assert!(!view.ci_joined);
    assert_eq!(view.table.rows.len(), 1);
    assert!(!view.table.headers().contains(&"Wilson_L"));
}

#[test]
fn summary_view_from_csv() {
    let dir = fixture();
    let mut cache = WorkbookCache::new();
    let wb = cache.get_or_load(dir.path(), &SheetNames::default()).unwrap();

    let variant = SummaryVariant::new(Direction::Buy, Condition::Above);
    let view = SummaryView::build(&wb, variant, &TimeframeChoice::All);
    let table = view.table.unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][0], "5m");
    assert_eq!(table.rows[0][7], "-3.00%");
}

#[test]
fn unknown_direction_in_primary_sheet_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "ML_Predictions_All",
        "\
Direction,Condition,Timeframe,Threshold,ML_Pred_Prob,Historical_Win_Ratio
Hold,above,1h,1.0,0.6,0.5
",
    );
    let mut cache = WorkbookCache::new();
    let err = cache.get_or_load(dir.path(), &SheetNames::default()).unwrap_err();
    assert!(matches!(err, LoadError::MalformedCell { .. }));
}
