// GUI configuration module
pub mod theme;

use std::path::Path;

use anyhow::{bail, Context};
use engine::options::{CandlestickOptions, HistogramOptions, ScaleMargins, Size};
use serde::Deserialize;

use crate::components::chart::lifecycle::SeriesLayout;
use crate::state::ambient_theme::ThemeMode;

/// Mirrors the structure of assets/config/default.json.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    pub chart: ChartConfig,
    pub data: DataSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub theme: ThemeMode,
    /// Used when RUST_LOG is not set.
    pub log_filter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    /// Initial container size for the demo host.
    pub width: u32,
    pub height: u32,
    pub candle: CandleStyle,
    pub price_margins: ScaleMargins,
    pub volume_margins: ScaleMargins,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CandleStyle {
    pub up_color: String,
    pub down_color: String,
    pub wick_up_color: String,
    pub wick_down_color: String,
    pub border_visible: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub csv_delimiter: char,
    /// Bars generated when no CSV file is given.
    pub sample_bars: usize,
}

impl ChartConfig {
    pub fn container_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn series_layout(&self) -> SeriesLayout {
        SeriesLayout {
            price: CandlestickOptions {
                up_color: self.candle.up_color.clone(),
                down_color: self.candle.down_color.clone(),
                wick_up_color: self.candle.wick_up_color.clone(),
                wick_down_color: self.candle.wick_down_color.clone(),
                border_visible: self.candle.border_visible,
                scale_margins: self.price_margins,
                ..CandlestickOptions::default()
            },
            volume: HistogramOptions {
                scale_margins: self.volume_margins,
                ..HistogramOptions::default()
            },
        }
    }
}

impl ChartConfig {
    /// Margins must be fractions in `0..=1` and the price band must end at or
    /// above the point where the volume band starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, margins) in [
            ("price_margins", self.price_margins),
            ("volume_margins", self.volume_margins),
        ] {
            let unit = 0.0..=1.0;
            if !unit.contains(&margins.top)
                || !unit.contains(&margins.bottom)
                || margins.top + margins.bottom > 1.0
            {
                bail!(
                    "chart.{} must be fractions in 0..=1 that leave room for the series \
                     (top {}, bottom {})",
                    name,
                    margins.top,
                    margins.bottom
                );
            }
        }

        let price_band_bottom = 1.0 - self.price_margins.bottom;
        if price_band_bottom > self.volume_margins.top {
            bail!(
                "chart.price_margins band ends at {} but chart.volume_margins band starts at {}; \
                 volume bars would overlap the candles",
                price_band_bottom,
                self.volume_margins.top
            );
        }
        Ok(())
    }
}

impl AppConfig {
    /// The embedded default configuration.
    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        let config: AppConfig = serde_json::from_str(config_str)
            .context("Failed to parse embedded default configuration")?;
        config
            .chart
            .validate()
            .context("Invalid embedded default configuration")?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file '{}'", path.display()))?;
        let config: AppConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file '{}'", path.display()))?;
        config
            .chart
            .validate()
            .with_context(|| format!("Invalid configuration file '{}'", path.display()))?;
        Ok(config)
    }
}
