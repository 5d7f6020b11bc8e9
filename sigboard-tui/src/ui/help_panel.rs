//! Help: keyboard shortcuts and column glossary.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, theme, "Global");
    key(&mut lines, theme, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, theme, "?", "Open this help");
    key(&mut lines, theme, "r", "Reload the workbook from disk");
    key(&mut lines, theme, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, theme, "Signals");
    key(&mut lines, theme, "d / c", "Toggle direction (Buy/Sell) / condition (above/below)");
    key(&mut lines, theme, "i", "Show or hide confidence intervals");
    key(&mut lines, theme, "t / T", "Next / previous threshold");
    key(&mut lines, theme, "a", "All thresholds");
    key(&mut lines, theme, "1-4", "Toggle Favourable / Marginal / Unfavourable / Insufficient data");
    key(&mut lines, theme, "j / k", "Scroll the table");
    lines.push(Line::from(""));

    section(&mut lines, theme, "Summary");
    key(&mut lines, theme, "v", "Next summary sheet");
    key(&mut lines, theme, "d / c", "Toggle direction / condition");
    key(&mut lines, theme, "t / T", "Next / previous timeframe");
    key(&mut lines, theme, "a", "All timeframes");
    lines.push(Line::from(""));

    section(&mut lines, theme, "Columns");
    key(&mut lines, theme, "Signal_Strength", "ML_Pred_Prob minus Historical_Win_Ratio");
    key(&mut lines, theme, "Margin_of_Error", "Half the Wilson interval width");
    key(&mut lines, theme, "Confidence", "High N>=1000, Medium N>=300, Low N>0");
    key(&mut lines, theme, "Verdict", "Favourable if strength >= 3% or avg profit >= 0.25%");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, theme: &Theme, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme.header())));
}

fn key(lines: &mut Vec<Line<'_>>, theme: &Theme, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), ratatui::style::Style::default().fg(theme.accent)),
        Span::styled(desc.to_string(), theme.hint()),
    ]));
}
