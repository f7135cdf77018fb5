// GUI components module
pub mod chart;
