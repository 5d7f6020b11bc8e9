//! Signal chart widget: historical ratio and model probability per threshold.
//!
//! Historical series are drawn as solid lines, model series as dots. Interval
//! error bars are drawn as short vertical segments around the historical
//! points.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use sigboard_core::present::{ChartView, Series};

use crate::theme::Theme;

pub struct SignalChart<'a> {
    view: &'a ChartView,
    theme: &'a Theme,
}

impl<'a> SignalChart<'a> {
    pub fn new(view: &'a ChartView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

fn points(series: &Series) -> Vec<(f64, f64)> {
    series.points.iter().map(|p| (p.x as f64, p.y)).collect()
}

/// One two-point segment per error bar, anchored on the historical point.
fn error_segments(series: &Series) -> Vec<[(f64, f64); 2]> {
    series
        .error_bars
        .iter()
        .filter_map(|bar| {
            let y = series.points.iter().find(|p| p.x == bar.x)?.y;
            let x = bar.x as f64;
            Some([(x, (y - bar.lower).max(0.0)), (x, (y + bar.upper).min(1.0))])
        })
        .collect()
}

impl<'a> Widget for SignalChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.view.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        // Datasets borrow their data, so materialize every slice first.
        let lines: Vec<(String, String, Vec<(f64, f64)>, Vec<(f64, f64)>)> = self
            .view
            .series
            .iter()
            .map(|pair| {
                (
                    pair.historical.name.clone(),
                    pair.model.name.clone(),
                    points(&pair.historical),
                    points(&pair.model),
                )
            })
            .collect();
        let bars: Vec<Vec<[(f64, f64); 2]>> = self
            .view
            .series
            .iter()
            .map(|pair| error_segments(&pair.historical))
            .collect();

        let mut datasets = Vec::new();
        for (i, pair) in self.view.series.iter().enumerate() {
            let color = self.theme.series_color(pair.color);
            let (hist_name, ml_name, hist, ml) = &lines[i];
            datasets.push(
                Dataset::default()
                    .name(hist_name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(color))
                    .data(hist),
            );
            datasets.push(
                Dataset::default()
                    .name(ml_name.clone())
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .data(ml),
            );
            for segment in &bars[i] {
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::Braille)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(color).add_modifier(Modifier::DIM))
                        .data(segment),
                );
            }
        }

        let x_max = self.view.x_labels.len().saturating_sub(1).max(1) as f64;
        let (y_min, y_max) = self.view.y_range;
        let muted = Style::default().fg(self.theme.muted);

        let chart = Chart::new(datasets)
            .block(block)
            .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)))
            .x_axis(
                Axis::default()
                    .title(Span::styled("Timeframe", muted))
                    .style(muted)
                    .bounds([0.0, x_max])
                    .labels(self.view.x_labels.iter().map(|l| Span::styled(l.clone(), muted))),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Win ratio", muted))
                    .style(muted)
                    .bounds([y_min, y_max])
                    .labels(vec![
                        Span::styled(format!("{:.0}%", y_min * 100.0), muted),
                        Span::styled(format!("{:.0}%", (y_min + y_max) * 50.0), muted),
                        Span::styled(format!("{:.0}%", y_max * 100.0), muted),
                    ]),
            );

        chart.render(area, buf);
    }
}
