// Services feeding the chart host
pub mod bar_source;
