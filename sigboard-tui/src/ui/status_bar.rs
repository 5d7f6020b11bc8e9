//! Bottom status bar: workbook source, load time, last status message.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    let source = app
        .workbook
        .as_ref()
        .map(|wb| wb.source.clone())
        .unwrap_or_else(|| app.workbook_path.display().to_string());
    spans.push(Span::styled(format!(" {source}"), theme.hint()));

    if let Some(at) = app.loaded_at {
        spans.push(Span::styled(format!(" @ {}", at.format("%H:%M:%S")), theme.hint()));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let color = match level {
            StatusLevel::Info => theme.accent,
            StatusLevel::Warning => theme.warning,
            StatusLevel::Error => theme.negative,
        };
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    } else if let Some(view) = &app.signals {
        spans.push(Span::styled(
            format!("{} of {} rows shown", view.table.rows.len(), view.enriched_rows),
            theme.hint(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
