// Chart host: owns the ambient theme and the container, mounts one
// candlestick chart and drives it until the props stream ends.
use engine::{ChartEngine, EngineError};
use tokio::sync::mpsc;

use crate::components::chart::lifecycle::{ChartInstance, SeriesLayout};
use crate::components::chart::{CandlestickChart, ChartProps, Teardown};
use crate::config::AppConfig;
use crate::state::{AmbientTheme, Container};

#[derive(Debug)]
pub struct App {
    theme: AmbientTheme,
    container: Container,
    layout: SeriesLayout,
}

impl App {
    pub fn new(theme: AmbientTheme, container: Container, layout: SeriesLayout) -> Self {
        Self { theme, container, layout }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            AmbientTheme::new(config.app.theme),
            Container::new(config.chart.container_size()),
            config.chart.series_layout(),
        )
    }

    pub fn theme(&self) -> &AmbientTheme {
        &self.theme
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Mounts on the first props, then applies every props update, theme
    /// change and container resize until `props_rx` closes, which unmounts.
    /// `on_frame` runs after mount and after each applied change.
    ///
    /// Returns `None` when no props ever arrived.
    pub async fn run<E, F>(
        &self,
        engine: &mut E,
        mut props_rx: mpsc::UnboundedReceiver<ChartProps>,
        mut on_frame: F,
    ) -> anyhow::Result<Option<Teardown>>
    where
        E: ChartEngine,
        F: FnMut(&E, &ChartInstance),
    {
        let Some(props) = props_rx.recv().await else {
            tracing::info!("Props stream closed before mount.");
            return Ok(None);
        };

        let container = Some(&self.container);
        let mounted = CandlestickChart::mount(engine, container, &self.theme, &self.layout, props)?;
        let Some(mut chart) = mounted else {
            return Ok(None);
        };
        on_frame(engine, chart.instance());

        let driven = drive(engine, &mut chart, &mut props_rx, &mut on_frame).await;
        let teardown = chart.unmount(engine)?;
        driven?;
        Ok(Some(teardown))
    }
}

/// Hands new props to a running host. Logs and returns `false` once the host
/// has stopped listening.
pub fn send_props(props_tx: &mpsc::UnboundedSender<ChartProps>, props: ChartProps) -> bool {
    let bars = props.bars.len();
    match props_tx.send(props) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!(bars, "Chart host stopped; props dropped.");
            false
        }
    }
}

async fn drive<E, F>(
    engine: &mut E,
    chart: &mut CandlestickChart,
    props_rx: &mut mpsc::UnboundedReceiver<ChartProps>,
    on_frame: &mut F,
) -> Result<(), EngineError>
where
    E: ChartEngine,
    F: FnMut(&E, &ChartInstance),
{
    loop {
        tokio::select! {
            maybe_props = props_rx.recv() => match maybe_props {
                Some(props) => {
                    chart.update(engine, props)?;
                }
                None => {
                    tracing::debug!(chart = %chart.instance().chart(), "Props stream closed.");
                    return Ok(());
                }
            },
            signal = chart.next_signal() => {
                tracing::debug!(?signal, "Ambient change.");
                chart.apply_signal(engine, signal)?;
            }
        }
        on_frame(engine, chart.instance());
    }
}
