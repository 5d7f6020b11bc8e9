//! Series colours keyed by threshold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::Threshold;

/// Named colour for a chart series. Renderers map these onto their own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesColor {
    Pink,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
    Cyan,
    Magenta,
    White,
}

impl SeriesColor {
    pub fn name(self) -> &'static str {
        match self {
            SeriesColor::Pink => "pink",
            SeriesColor::Blue => "blue",
            SeriesColor::Green => "green",
            SeriesColor::Yellow => "yellow",
            SeriesColor::Orange => "orange",
            SeriesColor::Red => "red",
            SeriesColor::Gray => "gray",
            SeriesColor::Cyan => "cyan",
            SeriesColor::Magenta => "magenta",
            SeriesColor::White => "white",
        }
    }

    /// sRGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            SeriesColor::Pink => (255, 105, 180),
            SeriesColor::Blue => (65, 135, 255),
            SeriesColor::Green => (80, 200, 120),
            SeriesColor::Yellow => (240, 210, 60),
            SeriesColor::Orange => (255, 150, 40),
            SeriesColor::Red => (230, 70, 70),
            SeriesColor::Gray => (150, 150, 150),
            SeriesColor::Cyan => (80, 210, 220),
            SeriesColor::Magenta => (200, 90, 220),
            SeriesColor::White => (235, 235, 235),
        }
    }
}

/// Exact threshold → colour lookup with a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    by_threshold: BTreeMap<Threshold, SeriesColor>,
    fallback: SeriesColor,
}

impl ColorMap {
    pub fn new(by_threshold: BTreeMap<Threshold, SeriesColor>, fallback: SeriesColor) -> Self {
        Self {
            by_threshold,
            fallback,
        }
    }

    pub fn color_for(&self, threshold: Threshold) -> SeriesColor {
        self.by_threshold
            .get(&threshold)
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(BTreeMap::new(), SeriesColor::Gray)
    }
}
