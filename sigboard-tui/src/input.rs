//! Keyboard input dispatch: error screen → global keys → panel-specific keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use sigboard_core::{SummaryVariant, ThresholdChoice, TimeframeChoice, Verdict};

use crate::app::{AppState, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. A failed load leaves only reload and quit.
    if app.load_error.is_some() {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.running = false,
            KeyCode::Char('r') => app.reload(),
            _ => {}
        }
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            app.active_panel = app.active_panel.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('?') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Signals => handle_signals_key(app, key),
        Panel::Summary => handle_summary_key(app, key),
        Panel::Help => {
            if key.code == KeyCode::Esc {
                app.active_panel = Panel::Signals;
            }
        }
    }
}

fn handle_signals_key(app: &mut AppState, key: KeyEvent) {
    let thresholds = app
        .signals
        .as_ref()
        .map(|s| s.thresholds.clone())
        .unwrap_or_default();
    let selection = &mut app.selection;

    match key.code {
        KeyCode::Char('d') => selection.direction = selection.direction.toggle(),
        KeyCode::Char('c') => selection.condition = selection.condition.toggle(),
        KeyCode::Char('i') => selection.show_ci = !selection.show_ci,
        KeyCode::Char('t') | KeyCode::Right | KeyCode::Char('l') => {
            selection.threshold = selection.threshold.cycle(&thresholds, true);
        }
        KeyCode::Char('T') | KeyCode::Left | KeyCode::Char('h') => {
            selection.threshold = selection.threshold.cycle(&thresholds, false);
        }
        KeyCode::Char('a') => selection.threshold = ThresholdChoice::All,
        KeyCode::Char(ch @ '1'..='4') => {
            let idx = (ch as usize) - ('1' as usize);
            selection.toggle_verdict(Verdict::ALL[idx]);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let rows = app.signals.as_ref().map_or(0, |s| s.table.rows.len());
            if app.table_scroll + 1 < rows {
                app.table_scroll += 1;
            }
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.table_scroll = app.table_scroll.saturating_sub(1);
            return;
        }
        _ => return,
    }
    app.refresh();
}

fn handle_summary_key(app: &mut AppState, key: KeyEvent) {
    let timeframes = app
        .summary
        .as_ref()
        .map(|s| s.timeframes.clone())
        .unwrap_or_default();
    let variant = app.summary_variant;

    match key.code {
        KeyCode::Char('v') => {
            app.summary_variant = variant.next();
            app.summary_timeframe = TimeframeChoice::All;
        }
        KeyCode::Char('d') => {
            app.summary_variant = SummaryVariant::new(variant.direction.toggle(), variant.condition);
            app.summary_timeframe = TimeframeChoice::All;
        }
        KeyCode::Char('c') => {
            app.summary_variant = SummaryVariant::new(variant.direction, variant.condition.toggle());
            app.summary_timeframe = TimeframeChoice::All;
        }
        KeyCode::Char('t') | KeyCode::Right | KeyCode::Char('l') => {
            app.summary_timeframe = app.summary_timeframe.cycle(&timeframes, true);
        }
        KeyCode::Char('T') | KeyCode::Left | KeyCode::Char('h') => {
            app.summary_timeframe = app.summary_timeframe.cycle(&timeframes, false);
        }
        KeyCode::Char('a') => app.summary_timeframe = TimeframeChoice::All,
        _ => return,
    }
    app.refresh();
}
