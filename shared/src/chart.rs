// Points consumed by the charting engine, one per bar.
use serde::Serialize;

/// Volume bar color for bars closing at or above their open.
pub const VOLUME_UP_COLOR: &str = "rgba(38, 166, 154, 0.5)";
/// Volume bar color for bars closing below their open.
pub const VOLUME_DOWN_COLOR: &str = "rgba(239, 83, 80, 0.5)";

/// Whole seconds since the Unix epoch, the engine's time axis unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UtcTimestamp(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandlestickPoint {
    pub time: UtcTimestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VolumePoint {
    pub time: UtcTimestamp,
    pub value: u64,
    pub color: &'static str,
}

impl VolumePoint {
    pub fn is_up(&self) -> bool {
        self.color == VOLUME_UP_COLOR
    }
}

/// The two parallel projections of a bar sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    pub candles: Vec<CandlestickPoint>,
    pub volumes: Vec<VolumePoint>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}
