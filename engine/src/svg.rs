// SVG rendering of a chart held by the memory engine.
use std::fmt::Write;

use shared::chart::{CandlestickPoint, VolumePoint};

use crate::memory::{ChartState, TimeRange};
use crate::options::{CandlestickOptions, HistogramOptions, SeriesData, SeriesOptions};

const GRID_DIVISIONS: usize = 6;
const PRICE_AXIS_WIDTH: f64 = 64.0;
const TIME_AXIS_HEIGHT: f64 = 24.0;
const BODY_FILL_RATIO: f64 = 0.7;
const LABEL_FONT_SIZE: u32 = 11;
const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Maps the visible time range onto the plot width.
struct TimeAxis {
    range: TimeRange,
    width: f64,
    slot: f64,
}

impl TimeAxis {
    fn new(range: TimeRange, width: f64, visible_points: usize) -> Self {
        Self {
            range,
            width,
            slot: width / visible_points.max(1) as f64,
        }
    }

    fn x(&self, t: i64) -> f64 {
        let span = (self.range.to - self.range.from) as f64;
        if span <= 0.0 {
            return self.width / 2.0;
        }
        let inner = self.width - self.slot;
        self.slot / 2.0 + (t - self.range.from) as f64 / span * inner
    }

    fn bar_width(&self) -> f64 {
        (self.slot * BODY_FILL_RATIO).max(1.0)
    }
}

/// Linear value-to-row mapping inside one scale band.
fn scale_y(value: f64, min: f64, max: f64, band: (f64, f64)) -> f64 {
    let (top, bottom) = band;
    if max <= min {
        return (top + bottom) / 2.0;
    }
    bottom - (value - min) / (max - min) * (bottom - top)
}

pub fn render(chart: &ChartState) -> String {
    let size = chart.options.size;
    let style = &chart.options.style;
    let plot_w = (size.width as f64 - PRICE_AXIS_WIDTH).max(0.0);
    let plot_h = (size.height as f64 - TIME_AXIS_HEIGHT).max(0.0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width,
        h = size.height
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, style.background);

    for i in 1..GRID_DIVISIONS {
        let y = plot_h * i as f64 / GRID_DIVISIONS as f64;
        let x = plot_w * i as f64 / GRID_DIVISIONS as f64;
        write_line(&mut out, (0.0, y), (plot_w, y), &style.grid_color);
        write_line(&mut out, (x, 0.0), (x, plot_h), &style.grid_color);
    }

    if let Some(range) = chart.visible_range.or_else(|| chart.data_range()) {
        for series in &chart.series {
            match (&series.options, &series.data) {
                (SeriesOptions::Candlestick(options), SeriesData::Candlestick(points)) => {
                    let text_color = &style.text_color;
                    draw_candles(&mut out, options, points, range, plot_w, plot_h, text_color);
                }
                (SeriesOptions::Histogram(options), SeriesData::Histogram(points)) => {
                    draw_volume(&mut out, options, points, range, plot_w, plot_h);
                }
                _ => {}
            }
        }
    }

    write_line(&mut out, (0.0, plot_h), (plot_w, plot_h), &style.time_scale_border);
    write_line(&mut out, (plot_w, 0.0), (plot_w, plot_h), &style.price_scale_border);
    out.push_str("</svg>\n");
    out
}

fn write_line(out: &mut String, from: (f64, f64), to: (f64, f64), stroke: &str) {
    let _ = writeln!(
        out,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
        from.0, from.1, to.0, to.1, stroke
    );
}

fn draw_candles(
    out: &mut String,
    options: &CandlestickOptions,
    points: &[CandlestickPoint],
    range: TimeRange,
    plot_w: f64,
    plot_h: f64,
    text_color: &str,
) {
    let visible: Vec<&CandlestickPoint> =
        points.iter().filter(|p| range.contains(p.time.0)).collect();
    let Some(last) = visible.last() else {
        return;
    };
    let min = visible.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);
    let max = visible.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);
    let band = options.scale_margins.band(plot_h);
    let axis = TimeAxis::new(range, plot_w, visible.len());
    let half = axis.bar_width() / 2.0;

    let _ = writeln!(out, r#"<g class="series-candlestick">"#);
    for point in &visible {
        let up = point.close >= point.open;
        let body_color = if up { &options.up_color } else { &options.down_color };
        let wick_color = if up { &options.wick_up_color } else { &options.wick_down_color };
        let x = axis.x(point.time.0);
        let y_open = scale_y(point.open, min, max, band);
        let y_close = scale_y(point.close, min, max, band);
        let top = y_open.min(y_close);
        let height = (y_open - y_close).abs().max(1.0);

        let wick_top = scale_y(point.high, min, max, band);
        let wick_bottom = scale_y(point.low, min, max, band);
        write_line(out, (x, wick_top), (x, wick_bottom), wick_color);
        let border = if options.border_visible {
            format!(r#" stroke="{wick_color}""#)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"{}/>"#,
            x - half,
            top,
            half * 2.0,
            height,
            body_color,
            border,
        );
    }
    let _ = writeln!(out, "</g>");

    let label_y = scale_y(last.close, min, max, band);
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{label_y:.2}" fill="{text_color}" font-size="{LABEL_FONT_SIZE}""#,
        plot_w + 4.0,
    );
    let _ = writeln!(out, r#" dominant-baseline="middle">{:.2}</text>"#, last.close);
}

fn draw_volume(
    out: &mut String,
    options: &HistogramOptions,
    points: &[VolumePoint],
    range: TimeRange,
    plot_w: f64,
    plot_h: f64,
) {
    let visible: Vec<&VolumePoint> = points.iter().filter(|p| range.contains(p.time.0)).collect();
    if visible.is_empty() {
        return;
    }
    let max = visible.iter().map(|p| p.value).max().unwrap_or(0) as f64;
    let band = options.scale_margins.band(plot_h);
    let axis = TimeAxis::new(range, plot_w, visible.len());
    let half = axis.bar_width() / 2.0;

    let _ = writeln!(out, r#"<g class="series-histogram">"#);
    for point in &visible {
        let x = axis.x(point.time.0);
        let top = scale_y(point.value as f64, 0.0, max, band);
        let _ = writeln!(
            out,
            r#"<rect x="{:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x - half,
            half * 2.0,
            (band.1 - top).max(0.0),
            point.color,
        );
    }
    let _ = writeln!(out, "</g>");
}
