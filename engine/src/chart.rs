// Chart and series handles, and the engine trait the chart component drives.
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::error::EngineError;
use crate::options::{ChartOptions, ChromeStyle, SeriesData, SeriesOptions, Size};

/// Handle to one chart living in an engine. Valid from `create_chart` until
/// `remove_chart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChartId(Uuid);

impl ChartId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChartId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart-{}", self.0)
    }
}

/// Handle to one series attached to a chart. Invalidated with its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeriesId(Uuid);

impl SeriesId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "series-{}", self.0)
    }
}

/// A stateful charting engine. Charts are created and removed explicitly;
/// everything in between mutates a live chart in place.
pub trait ChartEngine {
    fn create_chart(&mut self, options: &ChartOptions) -> Result<ChartId, EngineError>;

    fn add_series(
        &mut self,
        chart: ChartId,
        options: SeriesOptions,
    ) -> Result<SeriesId, EngineError>;

    /// Restyles layout, grid and scale borders. Series data is untouched.
    fn apply_style(&mut self, chart: ChartId, style: &ChromeStyle) -> Result<(), EngineError>;

    fn resize(&mut self, chart: ChartId, size: Size) -> Result<(), EngineError>;

    /// Replaces the whole data set of a series.
    fn set_series_data(&mut self, series: SeriesId, data: SeriesData) -> Result<(), EngineError>;

    /// Moves the visible time range so every current point is in view.
    fn fit_content(&mut self, chart: ChartId) -> Result<(), EngineError>;

    /// Destroys the chart and all of its series.
    fn remove_chart(&mut self, chart: ChartId) -> Result<(), EngineError>;
}
