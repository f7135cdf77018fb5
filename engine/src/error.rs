use thiserror::Error;

use crate::chart::{ChartId, SeriesId};
use crate::options::SeriesKind;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown chart: {0}")]
    UnknownChart(ChartId),

    #[error("Unknown series: {0}")]
    UnknownSeries(SeriesId),

    #[error("Series {series} expects {expected:?} data")]
    SeriesKindMismatch { series: SeriesId, expected: SeriesKind },
}
