// Chart lifecycle: creates one engine chart with its price and volume series
// per mount, and removes it on unmount.
use engine::options::{CandlestickOptions, ChartOptions, HistogramOptions, SeriesOptions, Size};
use engine::{ChartEngine, ChartId, EngineError, SeriesId};

use crate::config::theme::ThemePalette;
use crate::state::Container;

/// Fixed visual configuration of the two series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesLayout {
    pub price: CandlestickOptions,
    pub volume: HistogramOptions,
}

/// A live chart and its two series. Exists only while mounted; `release`
/// consumes it, so it cannot be released twice.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartInstance {
    chart: ChartId,
    price_series: SeriesId,
    volume_series: SeriesId,
}

impl ChartInstance {
    pub fn chart(&self) -> ChartId {
        self.chart
    }

    pub fn price_series(&self) -> SeriesId {
        self.price_series
    }

    pub fn volume_series(&self) -> SeriesId {
        self.volume_series
    }
}

/// Creates the chart sized to the container and styled with `palette`.
/// An absent container is a no-op: nothing is created and `Ok(None)` comes
/// back.
pub fn acquire<E: ChartEngine>(
    engine: &mut E,
    container: Option<&Container>,
    palette: &ThemePalette,
    layout: &SeriesLayout,
) -> Result<Option<ChartInstance>, EngineError> {
    let Some(container) = container else {
        tracing::warn!("No container to mount into; chart not created.");
        return Ok(None);
    };

    let size: Size = container.rendered_size();
    let chart = engine.create_chart(&ChartOptions {
        size,
        style: palette.chrome_style(),
    })?;

    // Series order matters: volume draws over the price pane's bottom band.
    let series = engine
        .add_series(chart, SeriesOptions::Candlestick(layout.price.clone()))
        .and_then(|price| {
            engine
                .add_series(chart, SeriesOptions::Histogram(layout.volume.clone()))
                .map(|volume| (price, volume))
        });
    let (price_series, volume_series) = match series {
        Ok(ids) => ids,
        Err(err) => {
            tracing::error!(chart = %chart, error = %err, "Adding series failed; removing chart.");
            if let Err(remove_err) = engine.remove_chart(chart) {
                tracing::error!(
                    chart = %chart,
                    error = %remove_err,
                    "Removing half-built chart failed."
                );
            }
            return Err(err);
        }
    };

    tracing::info!(chart = %chart, %size, "Chart acquired.");
    Ok(Some(ChartInstance {
        chart,
        price_series,
        volume_series,
    }))
}

/// Destroys the chart; every id held by `instance` is invalid afterwards.
pub fn release<E: ChartEngine>(
    engine: &mut E,
    instance: ChartInstance,
) -> Result<ChartId, EngineError> {
    engine.remove_chart(instance.chart)?;
    tracing::info!(chart = %instance.chart, "Chart released.");
    Ok(instance.chart)
}
