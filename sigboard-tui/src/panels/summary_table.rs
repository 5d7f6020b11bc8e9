//! Per-timeframe summary table widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use sigboard_core::present::{SummaryColumn, SummaryTableView};

use super::signal_table::column_widths;
use crate::theme::Theme;

pub struct SummaryTable<'a> {
    view: &'a SummaryTableView,
    title: String,
    theme: &'a Theme,
}

impl<'a> SummaryTable<'a> {
    pub fn new(view: &'a SummaryTableView, title: String, theme: &'a Theme) -> Self {
        Self { view, title, theme }
    }
}

impl<'a> Widget for SummaryTable<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let headers = self.view.headers();
        let header = Row::new(headers.iter().map(|h| Cell::from(*h).style(self.theme.header())));
        let widths = column_widths(&headers, self.view.rows.iter().map(|r| r.as_slice()));

        let rows = self.view.rows.iter().map(|cells| {
            Row::new(self.view.columns.iter().zip(cells).map(|(column, text)| {
                let style = match column {
                    SummaryColumn::LiftVsBase if text.starts_with('-') => {
                        Style::default().fg(self.theme.negative)
                    }
                    SummaryColumn::LiftVsBase if text.starts_with('+') => {
                        Style::default().fg(self.theme.positive)
                    }
                    _ => Style::default().fg(self.theme.text_primary),
                };
                Cell::from(text.as_str()).style(style)
            }))
        });

        Table::new(rows, widths.into_iter().map(Constraint::Length))
            .header(header)
            .block(block)
            .column_spacing(2)
            .render(area, buf);
    }
}
