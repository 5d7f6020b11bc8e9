//! Enriched signals table widget with verdict and confidence colouring.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use sigboard_core::present::{SignalColumn, TableRow, TableView};

use crate::theme::Theme;

pub struct SignalTable<'a> {
    view: &'a TableView,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> SignalTable<'a> {
    pub fn new(view: &'a TableView, scroll: usize, theme: &'a Theme) -> Self {
        Self { view, scroll, theme }
    }

    fn cell_style(&self, column: SignalColumn, text: &str, row: &TableRow) -> Style {
        match column {
            SignalColumn::Verdict => Style::default()
                .fg(self.theme.verdict_color(row.verdict))
                .add_modifier(Modifier::BOLD),
            SignalColumn::Confidence => {
                Style::default().fg(self.theme.confidence_color(row.confidence))
            }
            SignalColumn::SignalStrength if text.starts_with('-') => {
                Style::default().fg(self.theme.negative)
            }
            SignalColumn::SignalStrength if text.starts_with('+') => {
                Style::default().fg(self.theme.positive)
            }
            _ => Style::default().fg(self.theme.text_primary),
        }
    }
}

/// Column width: widest of header and cells.
pub fn column_widths<'s>(headers: &[&str], rows: impl Iterator<Item = &'s [String]>) -> Vec<u16> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in rows {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths.into_iter().map(|w| w.min(u16::MAX as usize) as u16).collect()
}

impl<'a> Widget for SignalTable<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total = self.view.rows.len();
        let block = Block::default()
            .title(format!(" Signals ({total} rows) "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let headers = self.view.headers();
        let header = Row::new(headers.iter().map(|h| Cell::from(*h).style(self.theme.header()))).height(1);

        let widths = column_widths(&headers, self.view.rows.iter().map(|r| r.cells.as_slice()));

        let rows = self.view.rows.iter().skip(self.scroll).map(|row| {
            let cells = self
                .view
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(column, text)| {
                    Cell::from(text.as_str()).style(self.cell_style(*column, text, row))
                });
            Row::new(cells)
        });

        let table = Table::new(rows, widths.into_iter().map(Constraint::Length))
            .header(header)
            .block(block)
            .column_spacing(2);

        table.render(area, buf);
    }
}
