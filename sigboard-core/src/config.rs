//! Dashboard configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock sheet names and threshold colours.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{Condition, Direction, SummaryVariant, Threshold};
use crate::present::{ColorMap, SeriesColor};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid threshold key in [colors.thresholds]: {0}")]
    InvalidThreshold(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Workbook opened when none is given on the command line.
    pub workbook: PathBuf,
    pub sheets: SheetNames,
    pub colors: ColorConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("data2.xlsx"),
            sheets: SheetNames::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        // Surface bad colour keys at load time rather than on first render.
        config.color_map()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn color_map(&self) -> Result<ColorMap, ConfigError> {
        let mut thresholds = BTreeMap::new();
        for (key, color) in &self.colors.thresholds {
            let threshold: Threshold = key
                .parse()
                .map_err(|_| ConfigError::InvalidThreshold(key.clone()))?;
            thresholds.insert(threshold, *color);
        }
        Ok(ColorMap::new(thresholds, self.colors.default))
    }
}

/// Names of the workbook tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub predictions: String,
    pub ci_buy: String,
    pub ci_sell: String,
    pub descriptive: String,
    pub summary_buy_above: String,
    pub summary_buy_below: String,
    pub summary_sell_above: String,
    pub summary_sell_below: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            predictions: "ML_Predictions_All".into(),
            ci_buy: "Prob_Buy_with_Ratio".into(),
            ci_sell: "Prob_Sell_with_Ratio".into(),
            descriptive: "Descriptive_All".into(),
            summary_buy_above: "Summary_Buy_Above".into(),
            summary_buy_below: "Summary_Buy_Below".into(),
            summary_sell_above: "Summary_Sell_Above".into(),
            summary_sell_below: "Summary_Sell_Below".into(),
        }
    }
}

impl SheetNames {
    pub fn ci(&self, direction: Direction) -> &str {
        match direction {
            Direction::Buy => &self.ci_buy,
            Direction::Sell => &self.ci_sell,
        }
    }

    pub fn summary(&self, variant: SummaryVariant) -> &str {
        match (variant.direction, variant.condition) {
            (Direction::Buy, Condition::Above) => &self.summary_buy_above,
            (Direction::Buy, Condition::Below) => &self.summary_buy_below,
            (Direction::Sell, Condition::Above) => &self.summary_sell_above,
            (Direction::Sell, Condition::Below) => &self.summary_sell_below,
        }
    }
}

/// Threshold → series colour mapping as written in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub default: SeriesColor,
    /// Keys are threshold values as strings (`"2.5"`), since TOML keys are strings.
    pub thresholds: BTreeMap<String, SeriesColor>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        let thresholds = [
            ("3.0", SeriesColor::Pink),
            ("2.5", SeriesColor::Blue),
            ("2.0", SeriesColor::Green),
            ("1.5", SeriesColor::Yellow),
            ("1.0", SeriesColor::Orange),
            ("0.5", SeriesColor::Red),
        ]
        .into_iter()
        .map(|(k, c)| (k.to_string(), c))
        .collect();
        Self {
            default: SeriesColor::Gray,
            thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thr(v: f64) -> Threshold {
        Threshold::from_f64(v).unwrap()
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.sheets.predictions, "ML_Predictions_All");
    }

    #[test]
    fn partial_sheet_override_keeps_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            workbook = "stats.xlsx"
            [sheets]
            descriptive = "Desc"
            "#,
        )
        .unwrap();
        assert_eq!(config.workbook, PathBuf::from("stats.xlsx"));
        assert_eq!(config.sheets.descriptive, "Desc");
        assert_eq!(config.sheets.ci_sell, "Prob_Sell_with_Ratio");
    }

    #[test]
    fn default_color_map_matches_stock_palette() {
        let map = DashboardConfig::default().color_map().unwrap();
        assert_eq!(map.color_for(thr(3.0)), SeriesColor::Pink);
        assert_eq!(map.color_for(thr(1.0)), SeriesColor::Orange);
        assert_eq!(map.color_for(thr(0.75)), SeriesColor::Gray);
    }

    #[test]
    fn custom_colors_parse() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [colors]
            default = "white"
            [colors.thresholds]
            "0.25" = "cyan"
            "#,
        )
        .unwrap();
        let map = config.color_map().unwrap();
        assert_eq!(map.color_for(thr(0.25)), SeriesColor::Cyan);
        assert_eq!(map.color_for(thr(3.0)), SeriesColor::White);
    }

    #[test]
    fn bad_threshold_key_is_rejected() {
        let err = DashboardConfig::from_toml_str(
            r#"
            [colors.thresholds]
            "high" = "red"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(_)));
    }

    #[test]
    fn sheet_lookup_by_variant() {
        let names = SheetNames::default();
        assert_eq!(
            names.summary(SummaryVariant::new(Direction::Sell, Condition::Below)),
            "Summary_Sell_Below"
        );
        assert_eq!(names.ci(Direction::Buy), "Prob_Buy_with_Ratio");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DashboardConfig::load(Path::new("/nonexistent/sigboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
