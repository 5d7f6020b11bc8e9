//! Colour tokens for the dashboards.
//!
//! Dark background with neon accents:
//! - **Accent**: electric cyan (focus, headers)
//! - **Positive**: neon green (favourable verdicts, positive lift)
//! - **Negative**: hot pink (unfavourable verdicts, errors)
//! - **Warning**: neon orange (marginal verdicts, warnings)
//! - **Muted**: steel blue (hints, missing data)

use ratatui::style::{Color, Modifier, Style};

use sigboard_core::present::SeriesColor;
use sigboard_core::{Confidence, Verdict};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    pub fn verdict_color(&self, verdict: Verdict) -> Color {
        match verdict {
            Verdict::Favourable => self.positive,
            Verdict::Marginal => self.warning,
            Verdict::Unfavourable => self.negative,
            Verdict::InsufficientData => self.muted,
        }
    }

    pub fn confidence_color(&self, confidence: Confidence) -> Color {
        match confidence {
            Confidence::High => self.positive,
            Confidence::Medium => self.accent,
            Confidence::Low => self.warning,
            Confidence::None | Confidence::Unknown => self.muted,
        }
    }

    /// Terminal colour for a configured series colour.
    pub fn series_color(&self, color: SeriesColor) -> Color {
        let (r, g, b) = color.rgb();
        Color::Rgb(r, g, b)
    }

    pub fn border(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }
}
