// Engine library root
// The charting engine boundary: the `ChartEngine` trait the chart component
// drives, its option types, and the in-memory engine that renders to SVG.

pub mod chart;
pub mod error;
pub mod memory;
pub mod options;
pub mod svg;

pub use chart::{ChartEngine, ChartId, SeriesId};
pub use error::EngineError;
pub use memory::MemoryEngine;
