//! Summary panel: one per-timeframe summary sheet, optionally narrowed to a
//! single timeframe.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::panels::SummaryTable;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    let header = vec![
        Line::from(Span::styled(
            format!(
                "Summary: {}  Timeframe: {}",
                app.summary_variant,
                app.summary_timeframe.label()
            ),
            app.theme.text(),
        )),
        Line::from(Span::styled(
            "  [v] next variant [d]irection [c]ondition  [t/T] timeframe [a]ll  [r]eload",
            app.theme.hint(),
        )),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    let sheet = app.config.sheets.summary(app.summary_variant);
    match app.summary.as_ref().and_then(|s| s.table.as_ref()) {
        Some(table) => {
            f.render_widget(SummaryTable::new(table, sheet.to_string(), &app.theme), chunks[1]);
        }
        None => {
            f.render_widget(
                Paragraph::new(Span::styled(
                    format!("Sheet '{sheet}' is not in this workbook."),
                    app.theme.hint(),
                )),
                chunks[1],
            );
        }
    }
}
