//! Top-level UI layout: one panel at a time plus a status bar.

pub mod error_panel;
pub mod help_panel;
pub mod signals_panel;
pub mod status_bar;
pub mod summary_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Panel};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    // A failed load replaces every panel.
    if let Some(message) = &app.load_error {
        error_panel::render(f, main_area, app, message);
    } else {
        draw_panel(f, main_area, app);
    }

    status_bar::render(f, status_area, app);
}

fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border(true))
        .title(format!(" {} [{}/{}] ", panel.label(), panel.index() + 1, Panel::COUNT))
        .title_style(app.theme.header());

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Signals => signals_panel::render(f, inner, app),
        Panel::Summary => summary_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}
