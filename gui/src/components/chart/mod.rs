// Candlestick chart and the pieces that keep it in sync.
pub mod candlestick;
pub mod data_sync;
pub mod lifecycle;
pub mod size_sync;
pub mod theme_sync;

pub use candlestick::{CandlestickChart, ChartProps, Signal, Teardown, TeardownStep};
