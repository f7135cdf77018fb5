// Shared data model: price bars and the chart points projected from them.
pub mod chart;
pub mod models;
pub mod projection;
pub mod utils;
