// Options accepted by the charting engine.
use serde::{Deserialize, Serialize};
use shared::chart::{CandlestickPoint, VolumePoint};

pub const UP_COLOR: &str = "#26a69a";
pub const DOWN_COLOR: &str = "#ef5350";

/// Rendered size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero dimension means nothing can be drawn, e.g. a detached container.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Colors for everything that is not series data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromeStyle {
    pub background: String,
    pub text_color: String,
    pub grid_color: String,
    pub time_scale_border: String,
    pub price_scale_border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub size: Size,
    pub style: ChromeStyle,
}

/// Fractions of the pane height kept free above and below a scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMargins {
    pub top: f64,
    pub bottom: f64,
}

impl ScaleMargins {
    /// Price series band: keeps the bottom quarter free for volume.
    pub const PRICE: ScaleMargins = ScaleMargins { top: 0.05, bottom: 0.25 };
    /// Volume series band: bottom fifth of the pane.
    pub const VOLUME: ScaleMargins = ScaleMargins { top: 0.8, bottom: 0.0 };

    /// Pixel rows `(top, bottom)` the scale occupies in a pane of `height`.
    pub fn band(&self, height: f64) -> (f64, f64) {
        (height * self.top, height * (1.0 - self.bottom))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceFormat {
    Price,
    Volume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickOptions {
    pub up_color: String,
    pub down_color: String,
    pub wick_up_color: String,
    pub wick_down_color: String,
    pub border_visible: bool,
    pub price_scale_id: String,
    pub scale_margins: ScaleMargins,
}

impl Default for CandlestickOptions {
    fn default() -> Self {
        Self {
            up_color: UP_COLOR.to_string(),
            down_color: DOWN_COLOR.to_string(),
            wick_up_color: UP_COLOR.to_string(),
            wick_down_color: DOWN_COLOR.to_string(),
            border_visible: false,
            price_scale_id: "right".to_string(),
            scale_margins: ScaleMargins::PRICE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramOptions {
    pub price_format: PriceFormat,
    pub price_scale_id: String,
    pub scale_margins: ScaleMargins,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            price_format: PriceFormat::Volume,
            price_scale_id: "volume".to_string(),
            scale_margins: ScaleMargins::VOLUME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesKind {
    Candlestick,
    Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesOptions {
    Candlestick(CandlestickOptions),
    Histogram(HistogramOptions),
}

impl SeriesOptions {
    pub fn kind(&self) -> SeriesKind {
        match self {
            SeriesOptions::Candlestick(_) => SeriesKind::Candlestick,
            SeriesOptions::Histogram(_) => SeriesKind::Histogram,
        }
    }

    pub fn scale_margins(&self) -> ScaleMargins {
        match self {
            SeriesOptions::Candlestick(options) => options.scale_margins,
            SeriesOptions::Histogram(options) => options.scale_margins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SeriesData {
    Candlestick(Vec<CandlestickPoint>),
    Histogram(Vec<VolumePoint>),
}

impl SeriesData {
    pub fn kind(&self) -> SeriesKind {
        match self {
            SeriesData::Candlestick(_) => SeriesKind::Candlestick,
            SeriesData::Histogram(_) => SeriesKind::Histogram,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesData::Candlestick(points) => points.len(),
            SeriesData::Histogram(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn empty_for(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::Candlestick => SeriesData::Candlestick(Vec::new()),
            SeriesKind::Histogram => SeriesData::Histogram(Vec::new()),
        }
    }

    /// Earliest and latest point time, whatever the point order.
    pub fn time_bounds(&self) -> Option<(i64, i64)> {
        let bounds = |acc: Option<(i64, i64)>, t: i64| match acc {
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            None => Some((t, t)),
        };
        match self {
            SeriesData::Candlestick(points) => points.iter().map(|p| p.time.0).fold(None, bounds),
            SeriesData::Histogram(points) => points.iter().map(|p| p.time.0).fold(None, bounds),
        }
    }
}
