//! SigBoard TUI entry point.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use sigboard_core::DashboardConfig;
use sigboard_tui::{input, logging, persistence, ui, AppState};

#[derive(Parser)]
#[command(name = "sigboard-tui", about = "Terminal dashboards for signal statistics workbooks")]
struct Args {
    /// Workbook (.xlsx/.xls/.ods) or a directory of per-sheet CSV/Parquet files.
    /// Defaults to the `workbook` entry of the config.
    workbook: Option<PathBuf>,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Paths
    let state_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sigboard");
    let state_path = state_dir.join("state.json");
    // Keep the log writer alive until the terminal is restored.
    let _log_guard = logging::init_file_logging(&state_dir.join("sigboard-tui.log"), args.verbose)?;

    let config = DashboardConfig::load_or_default(args.config.as_deref())
        .context("failed to load config")?;
    let colors = config.color_map().context("invalid colour map in config")?;
    let workbook_path = args.workbook.unwrap_or_else(|| config.workbook.clone());
    info!(workbook = %workbook_path.display(), "starting dashboards");

    let mut app = AppState::new(config, colors, workbook_path);
    if let Some(state) = persistence::load(&state_path) {
        persistence::apply(&mut app, state);
    }
    app.load();

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    if let Err(err) = persistence::save(&state_path, &persistence::extract(&app)) {
        tracing::warn!(%err, "failed to save dashboard state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for input (250ms tick)
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
