// GUI library root
// The candlestick chart component, the ambient state it observes, and the
// host that mounts and drives it.

pub mod app;
pub mod components;
pub mod config;
pub mod services;
pub mod state;
