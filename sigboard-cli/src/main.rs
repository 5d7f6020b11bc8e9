//! SigBoard CLI: inspect workbooks and print signal and summary reports.
//!
//! Commands:
//! - `sheets`: list the sheets of a workbook and which tables loaded
//! - `signals`: enriched signal table plus the chart series for one selection
//! - `summary`: one per-timeframe summary table

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use sigboard_core::data::{open_source, Workbook};
use sigboard_core::present::{ChartView, SummaryTableView, TableView};
use sigboard_core::{
    Condition, DashboardConfig, Direction, Selection, SignalsView, SummaryVariant, SummaryView,
    Threshold, ThresholdChoice, Timeframe, TimeframeChoice, Verdict, WorkbookCache,
};

#[derive(Parser)]
#[command(name = "sigboard", about = "Signal statistics workbook reports")]
struct Cli {
    /// TOML config file (sheet names, colours, default workbook).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sheets and the tables loaded from them
    Sheets {
        /// Workbook file or per-sheet directory (defaults to the config's workbook)
        workbook: Option<PathBuf>,
    },

    /// Print the enriched signal table and chart series
    Signals {
        workbook: Option<PathBuf>,

        #[arg(long, default_value = "buy")]
        direction: Direction,

        #[arg(long, default_value = "above")]
        condition: Condition,

        /// Show a single threshold (e.g. 1.0)
        #[arg(long, conflicts_with = "all")]
        threshold: Option<Threshold>,

        /// Show every threshold (the default)
        #[arg(long)]
        all: bool,

        /// Leave out the confidence-interval join and error bars
        #[arg(long)]
        no_ci: bool,

        /// Keep only these verdicts (repeatable); all verdicts when omitted
        #[arg(long = "verdict", value_parser = parse_verdict)]
        verdicts: Vec<Verdict>,
    },

    /// Print one per-timeframe summary table
    Summary {
        workbook: Option<PathBuf>,

        #[arg(long, default_value = "buy")]
        direction: Direction,

        #[arg(long, default_value = "above")]
        condition: Condition,

        /// Only this timeframe (e.g. 1h)
        #[arg(long)]
        timeframe: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = DashboardConfig::load_or_default(cli.config.as_deref())
        .context("failed to load config")?;

    match cli.command {
        Commands::Sheets { workbook } => {
            let path = workbook.unwrap_or_else(|| config.workbook.clone());
            run_sheets(&config, &path)
        }
        Commands::Signals {
            workbook,
            direction,
            condition,
            threshold,
            all,
            no_ci,
            verdicts,
        } => {
            let path = workbook.unwrap_or_else(|| config.workbook.clone());
            let selection = build_selection(direction, condition, threshold, all, no_ci, &verdicts);
            run_signals(&config, &path, &selection)
        }
        Commands::Summary {
            workbook,
            direction,
            condition,
            timeframe,
        } => {
            let path = workbook.unwrap_or_else(|| config.workbook.clone());
            let choice = match timeframe {
                Some(label) => TimeframeChoice::Only(Timeframe::parse(&label)),
                None => TimeframeChoice::All,
            };
            run_summary(&config, &path, SummaryVariant::new(direction, condition), &choice)
        }
    }
}

fn parse_verdict(s: &str) -> Result<Verdict, String> {
    Verdict::parse_arg(s).ok_or_else(|| {
        format!("unknown verdict '{s}' (favourable, marginal, unfavourable, insufficient-data)")
    })
}

fn build_selection(
    direction: Direction,
    condition: Condition,
    threshold: Option<Threshold>,
    all: bool,
    no_ci: bool,
    verdicts: &[Verdict],
) -> Selection {
    let threshold = match threshold {
        Some(t) if !all => ThresholdChoice::Only(t),
        _ => ThresholdChoice::All,
    };
    let verdicts: BTreeSet<Verdict> = if verdicts.is_empty() {
        Verdict::ALL.into_iter().collect()
    } else {
        verdicts.iter().copied().collect()
    };
    Selection {
        direction,
        condition,
        show_ci: !no_ci,
        threshold,
        verdicts,
    }
}

fn load(config: &DashboardConfig, path: &Path) -> Result<std::sync::Arc<Workbook>> {
    let mut cache = WorkbookCache::new();
    let workbook = cache
        .get_or_load(path, &config.sheets)
        .with_context(|| format!("failed to load workbook {}", path.display()))?;
    info!(source = %workbook.source, "workbook ready");
    Ok(workbook)
}

fn run_sheets(config: &DashboardConfig, path: &Path) -> Result<()> {
    let source = open_source(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let names = source.sheet_names();
    println!("Source: {}", source.describe());
    println!("Sheets ({}):", names.len());
    for name in &names {
        println!("  {name}");
    }
    drop(source);

    let workbook = load(config, path)?;
    println!();
    println!("Tables:");
    let described = workbook.describe_tables(&config.sheets);
    let width = described.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    for (name, rows) in described {
        match rows {
            Some(n) => println!("  {name:<width$}  {n} rows"),
            None => println!("  {name:<width$}  absent"),
        }
    }
    Ok(())
}

fn run_signals(config: &DashboardConfig, path: &Path, selection: &Selection) -> Result<()> {
    let colors = config.color_map().context("invalid colour map in config")?;
    let workbook = load(config, path)?;

    if let ThresholdChoice::Only(t) = selection.threshold {
        let known = sigboard_core::filter::available_thresholds(&workbook.predictions.rows);
        if !known.contains(&t) {
            bail!(
                "threshold {t} does not occur in the predictions (available: {})",
                known.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
            );
        }
    }

    let view = SignalsView::build(&workbook, selection, &colors);
    debug!(rows = view.table.rows.len(), "signals view ready");

    if selection.show_ci && !view.ci_joined {
        eprintln!(
            "note: sheet '{}' is absent, interval columns are omitted",
            config.sheets.ci(selection.direction)
        );
    }

    print!("{}", render_chart(&view.chart));
    println!();
    if view.is_empty() {
        println!("No rows match the current selection.");
    } else {
        print!("{}", render_signal_table(&view.table));
    }
    println!();
    println!("{} of {} rows shown", view.table.rows.len(), view.enriched_rows);
    Ok(())
}

fn run_summary(
    config: &DashboardConfig,
    path: &Path,
    variant: SummaryVariant,
    timeframe: &TimeframeChoice,
) -> Result<()> {
    let workbook = load(config, path)?;
    let view = SummaryView::build(&workbook, variant, timeframe);

    println!("Summary {} ({})", variant, view.timeframe.label());
    match &view.table {
        Some(table) if table.rows.is_empty() => println!("No rows for this timeframe."),
        Some(table) => print!("{}", render_summary_table(table)),
        None => bail!(
            "sheet '{}' is not in this workbook",
            config.sheets.summary(variant)
        ),
    }
    Ok(())
}

// ── Plain-text rendering ────────────────────────────────────────────

fn render_chart(chart: &ChartView) -> String {
    let mut out = format!("{}\n", chart.title);
    if chart.is_empty() {
        out.push_str("  (nothing to plot)\n");
        return out;
    }

    let label = |x: usize| chart.x_labels.get(x).map(String::as_str).unwrap_or("?");
    for pair in &chart.series {
        for series in [&pair.historical, &pair.model] {
            let points: Vec<String> = series
                .points
                .iter()
                .map(|p| format!("{}={:.2}%", label(p.x), p.y * 100.0))
                .collect();
            out.push_str(&format!(
                "  {:<10} [{}] {}\n",
                series.name,
                pair.color.name(),
                points.join("  ")
            ));
            if !series.error_bars.is_empty() {
                let bars: Vec<String> = series
                    .error_bars
                    .iter()
                    .map(|b| {
                        format!(
                            "{}=+{:.2}/-{:.2}",
                            label(b.x),
                            b.upper * 100.0,
                            b.lower * 100.0
                        )
                    })
                    .collect();
                out.push_str(&format!("  {:<10} {}\n", "  ± CI", bars.join("  ")));
            }
        }
    }
    out
}

fn render_signal_table(table: &TableView) -> String {
    let headers = table.headers();
    let rows: Vec<&[String]> = table.rows.iter().map(|r| r.cells.as_slice()).collect();
    render_grid(&headers, &rows)
}

fn render_summary_table(table: &SummaryTableView) -> String {
    let headers = table.headers();
    let rows: Vec<&[String]> = table.rows.iter().map(Vec::as_slice).collect();
    render_grid(&headers, &rows)
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header.
fn render_grid(headers: &[&str], rows: &[&[String]]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_args_parse_into_selection() {
        let cli = Cli::try_parse_from([
            "sigboard",
            "signals",
            "book.xlsx",
            "--direction",
            "sell",
            "--condition",
            "below",
            "--threshold",
            "2.5",
            "--no-ci",
            "--verdict",
            "favourable",
            "--verdict",
            "insufficient-data",
        ])
        .unwrap();

        let Commands::Signals {
            workbook,
            direction,
            condition,
            threshold,
            all,
            no_ci,
            verdicts,
        } = cli.command
        else {
            panic!("expected signals command");
        };
        assert_eq!(workbook, Some(PathBuf::from("book.xlsx")));
        let selection = build_selection(direction, condition, threshold, all, no_ci, &verdicts);
        assert_eq!(selection.direction, Direction::Sell);
        assert_eq!(selection.condition, Condition::Below);
        assert!(!selection.show_ci);
        assert_eq!(
            selection.threshold,
            ThresholdChoice::Only(Threshold::from_f64(2.5).unwrap())
        );
        assert_eq!(selection.verdicts.len(), 2);
        assert!(selection.shows_verdict(Verdict::InsufficientData));
        assert!(!selection.shows_verdict(Verdict::Marginal));
    }

    #[test]
    fn threshold_and_all_conflict() {
        let res = Cli::try_parse_from([
            "sigboard",
            "signals",
            "--threshold",
            "1.0",
            "--all",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_verdict_is_rejected() {
        let res = Cli::try_parse_from(["sigboard", "signals", "--verdict", "great"]);
        assert!(res.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["sigboard", "summary", "-v", "--config", "sb.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("sb.toml")));
    }

    #[test]
    fn defaults_select_everything() {
        let selection = build_selection(Direction::Buy, Condition::Above, None, false, false, &[]);
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn grid_pads_columns_to_widest_cell() {
        let a = vec!["5m".to_string(), "61.00%".to_string()];
        let b = vec!["24h".to_string(), "".to_string()];
        let out = render_grid(&["Timeframe", "P"], &[&a, &b]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Timeframe  P");
        assert_eq!(lines[1], "---------  ------");
        assert_eq!(lines[2], "5m         61.00%");
        assert_eq!(lines[3], "24h");
    }
}
