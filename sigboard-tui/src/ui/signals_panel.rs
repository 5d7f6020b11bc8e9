//! Signals panel: selection line, chart on top, enriched table below.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use sigboard_core::Verdict;

use crate::app::AppState;
use crate::panels::{SignalChart, SignalTable};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Percentage(50),
            Constraint::Min(5),
        ])
        .split(area);

    f.render_widget(Paragraph::new(selection_lines(app)), chunks[0]);

    let Some(view) = app.signals.as_ref() else {
        f.render_widget(
            Paragraph::new(Span::styled("No workbook loaded.", app.theme.hint())),
            chunks[1],
        );
        return;
    };

    if view.chart.is_empty() {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{}: nothing to plot for this selection.", view.chart.title),
                    app.theme.hint(),
                )),
            ]),
            chunks[1],
        );
    } else {
        f.render_widget(SignalChart::new(&view.chart, &app.theme), chunks[1]);
    }

    f.render_widget(SignalTable::new(&view.table, app.table_scroll, &app.theme), chunks[2]);
}

fn selection_lines(app: &AppState) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let s = &app.selection;

    let mut first = vec![
        Span::styled(format!("Direction: {}", s.direction), theme.text()),
        Span::styled("  Condition: ", theme.text()),
        Span::styled(s.condition.to_string(), theme.text()),
        Span::styled(format!("  Threshold: {}", s.threshold.label()), theme.text()),
        Span::styled(
            format!("  CI: {}", if s.show_ci { "on" } else { "off" }),
            theme.text(),
        ),
        Span::styled("  Verdicts:", theme.text()),
    ];
    for (i, verdict) in Verdict::ALL.iter().enumerate() {
        let style = if s.shows_verdict(*verdict) {
            ratatui::style::Style::default().fg(theme.verdict_color(*verdict))
        } else {
            theme.hint().add_modifier(ratatui::style::Modifier::CROSSED_OUT)
        };
        first.push(Span::styled(format!(" {}:{}", i + 1, verdict.label()), style));
    }

    let second = Line::from(Span::styled(
        "  [d]irection [c]ondition [i] CI  [t/T] threshold [a]ll  [1-4] verdicts  [j/k] scroll  [r]eload",
        theme.hint(),
    ));
    vec![Line::from(first), second]
}
