// Headless chart host: mounts a candlestick chart on the in-memory engine,
// plays a short session against it and writes the last frame as SVG.
use std::path::PathBuf;

use anyhow::Context;
use chrono::{TimeZone, Utc};
use engine::options::Size;
use engine::MemoryEngine;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use gui::app::{send_props, App};
use gui::components::chart::ChartProps;
use gui::config::AppConfig;
use gui::services::bar_source;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_default()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.app.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(version = %config.version, "Starting candlestick chart host.");

    // Usage: gui [bars.csv] [out.svg]
    let mut args = std::env::args().skip(1);
    let csv_path = args.next().map(PathBuf::from);
    let out_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("chart.svg"));

    let bars = match &csv_path {
        Some(path) => bar_source::load_bars_from_csv(path, config.data.csv_delimiter)?,
        None => {
            let start = Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .context("Invalid sample start date")?;
            bar_source::sample_bars("SAMPLE", config.data.sample_bars, start)
        }
    };
    tracing::info!(bars = bars.len(), "Bars ready.");

    let app = App::from_config(&config);
    let mut engine = MemoryEngine::new();
    let (props_tx, props_rx) = mpsc::unbounded_channel();
    let mut last_frame: Option<String> = None;

    let session = async {
        let half = bars.len() / 2;
        let first = ChartProps {
            bars: bars[..half].to_vec(),
            class_name: Some("chart".to_string()),
        };
        send_props(&props_tx, first);
        tokio::task::yield_now().await;

        app.theme().toggle();
        tokio::task::yield_now().await;

        // Container collapses (e.g. a hidden tab) and comes back smaller.
        app.container().detach();
        tokio::task::yield_now().await;
        app.container().resize(Size::new(config.chart.width * 3 / 4, config.chart.height));
        tokio::task::yield_now().await;

        let full = ChartProps {
            bars: bars.clone(),
            class_name: Some("chart".to_string()),
        };
        send_props(&props_tx, full);
        tokio::task::yield_now().await;

        app.theme().toggle();
        tokio::task::yield_now().await;
        drop(props_tx);
    };

    let host = app.run(&mut engine, props_rx, |engine: &MemoryEngine, instance| {
        match engine.render_svg(instance.chart()) {
            Ok(svg) => last_frame = Some(svg),
            Err(e) => tracing::error!(error = %e, "Failed to render frame."),
        }
    });

    let ((), teardown) = tokio::join!(session, host);

    match teardown? {
        Some(teardown) => tracing::info!(steps = ?teardown.steps, "Chart torn down."),
        None => tracing::warn!("Chart was never mounted."),
    }

    match last_frame {
        Some(svg) => {
            std::fs::write(&out_path, svg)
                .with_context(|| format!("Failed to write SVG to '{}'", out_path.display()))?;
            tracing::info!(path = %out_path.display(), "Last frame written.");
        }
        None => tracing::warn!("No frame rendered."),
    }

    tracing::info!("Candlestick chart host finished.");
    Ok(())
}
