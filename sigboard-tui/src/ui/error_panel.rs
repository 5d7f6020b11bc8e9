//! Full-screen load error. Nothing else renders while the workbook is broken.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.negative))
        .title(" Workbook error ")
        .title_style(Style::default().fg(theme.negative).add_modifier(Modifier::BOLD));

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Could not load {}", app.workbook_path.display()),
            Style::default().fg(theme.negative).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme.text()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Fix the workbook and press r to reload, or q to quit.",
        theme.hint(),
    )));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
