// Data sync: pushes each new bar sequence into the two series and frames the
// view once per mount.
use engine::options::SeriesData;
use engine::{ChartEngine, EngineError};
use shared::models::Bar;
use shared::projection::project;

use super::lifecycle::ChartInstance;

/// Whether the view has been framed to the data since acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitState {
    NotFit,
    Fit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Same bars as last time; the series were left as they are.
    Unchanged,
    Replaced { points: usize, fitted: bool },
}

/// Per-mount data state. A new mount starts a new `DataSync`, which is the
/// only way back to `FitState::NotFit`.
#[derive(Debug)]
pub struct DataSync {
    fit: FitState,
    last_bars: Option<Vec<Bar>>,
}

impl Default for DataSync {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSync {
    pub fn new() -> Self {
        Self {
            fit: FitState::NotFit,
            last_bars: None,
        }
    }

    pub fn fit_state(&self) -> FitState {
        self.fit
    }

    /// Replaces both series with the projection of `bars`. The first call
    /// after acquisition also fits the view, empty bars included; later calls
    /// leave the user's pan and zoom alone.
    pub fn apply<E: ChartEngine>(
        &mut self,
        engine: &mut E,
        instance: &ChartInstance,
        bars: &[Bar],
    ) -> Result<SyncOutcome, EngineError> {
        if self.last_bars.as_deref() == Some(bars) {
            tracing::debug!(
                chart = %instance.chart(),
                bars = bars.len(),
                "Bars unchanged; skipping series update."
            );
            return Ok(SyncOutcome::Unchanged);
        }

        let projection = project(bars);
        let points = projection.len();
        engine.set_series_data(
            instance.price_series(),
            SeriesData::Candlestick(projection.candles),
        )?;
        engine.set_series_data(
            instance.volume_series(),
            SeriesData::Histogram(projection.volumes),
        )?;
        self.last_bars = Some(bars.to_vec());

        let fitted = match self.fit {
            FitState::NotFit => {
                engine.fit_content(instance.chart())?;
                self.fit = FitState::Fit;
                true
            }
            FitState::Fit => false,
        };

        tracing::debug!(chart = %instance.chart(), points, fitted, "Series data replaced.");
        Ok(SyncOutcome::Replaced { points, fitted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::chart::lifecycle::{acquire, SeriesLayout};
    use crate::config::theme::ThemePalette;
    use crate::state::Container;
    use chrono::{TimeZone, Utc};
    use engine::memory::{EngineCall, TimeRange};
    use engine::options::Size;
    use engine::MemoryEngine;
    use rust_decimal::Decimal;
    use shared::models::Timeframe;

    fn create_bar(secs: i64, open: i64, close: i64) -> Bar {
        Bar {
            instrument_id: "7203".to_string(),
            timeframe: Timeframe::Daily,
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            open: Decimal::from(open),
            high: Decimal::from(open.max(close) + 1),
            low: Decimal::from(open.min(close) - 1),
            close: Decimal::from(close),
            volume: 100,
        }
    }

    fn mounted() -> (MemoryEngine, ChartInstance) {
        let mut engine = MemoryEngine::new();
        let container = Container::new(Size::new(800, 600));
        let palette = ThemePalette::resolve(false);
        let instance = acquire(&mut engine, Some(&container), &palette, &SeriesLayout::default())
            .unwrap()
            .unwrap();
        (engine, instance)
    }

    #[test]
    fn test_first_update_fits_once() {
        let (mut engine, instance) = mounted();
        let mut sync = DataSync::new();
        assert_eq!(sync.fit_state(), FitState::NotFit);

        let outcome = sync.apply(&mut engine, &instance, &[create_bar(1, 10, 11)]).unwrap();

        assert_eq!(outcome, SyncOutcome::Replaced { points: 1, fitted: true });
        assert_eq!(sync.fit_state(), FitState::Fit);
        assert_eq!(engine.fit_count(instance.chart()), 1);
    }

    #[test]
    fn test_fit_happens_exactly_once_over_many_updates() {
        let (mut engine, instance) = mounted();
        let mut sync = DataSync::new();

        for n in 1..=5 {
            let bars: Vec<Bar> = (0..n).map(|i| create_bar(i, 10, 11)).collect();
            sync.apply(&mut engine, &instance, &bars).unwrap();
        }

        assert_eq!(engine.fit_count(instance.chart()), 1);
    }

    #[test]
    fn test_empty_first_update_still_latches() {
        let (mut engine, instance) = mounted();
        let mut sync = DataSync::new();

        let first = sync.apply(&mut engine, &instance, &[]).unwrap();
        let second = sync.apply(&mut engine, &instance, &[create_bar(1, 10, 9)]).unwrap();

        assert_eq!(first, SyncOutcome::Replaced { points: 0, fitted: true });
        assert_eq!(second, SyncOutcome::Replaced { points: 1, fitted: false });
        assert_eq!(engine.fit_count(instance.chart()), 1);
    }

    #[test]
    fn test_empty_update_clears_both_series() {
        let (mut engine, instance) = mounted();
        let mut sync = DataSync::new();
        let bars = [create_bar(1, 10, 11), create_bar(2, 11, 10)];
        sync.apply(&mut engine, &instance, &bars).unwrap();

        sync.apply(&mut engine, &instance, &[]).unwrap();

        assert!(engine.series(instance.price_series()).unwrap().data.is_empty());
        assert!(engine.series(instance.volume_series()).unwrap().data.is_empty());
        assert_eq!(engine.fit_count(instance.chart()), 1);
    }

    #[test]
    fn test_identical_bars_are_skipped() {
        let (mut engine, instance) = mounted();
        let mut sync = DataSync::new();
        let bars = vec![create_bar(1, 10, 11)];
        sync.apply(&mut engine, &instance, &bars).unwrap();
        let journal_len = engine.journal().len();

        let outcome = sync.apply(&mut engine, &instance, &bars.clone()).unwrap();

        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(engine.journal().len(), journal_len);
    }

    #[test]
    fn test_later_updates_keep_user_view() {
        let (mut engine, instance) = mounted();
        let mut sync = DataSync::new();
        let bars = [create_bar(1, 10, 11), create_bar(2, 11, 12)];
        sync.apply(&mut engine, &instance, &bars).unwrap();
        let panned = TimeRange { from: 2, to: 2 };
        engine.set_visible_range(instance.chart(), panned).unwrap();

        let extended = [bars[0].clone(), bars[1].clone(), create_bar(3, 12, 13)];
        sync.apply(&mut engine, &instance, &extended).unwrap();

        assert_eq!(engine.chart(instance.chart()).unwrap().visible_range, Some(panned));
    }

    #[test]
    fn test_push_order_is_price_then_volume_then_fit() {
        let (mut engine, instance) = mounted();
        let mut sync = DataSync::new();
        let before = engine.journal().len();

        sync.apply(&mut engine, &instance, &[create_bar(1, 10, 11)]).unwrap();

        let calls = &engine.journal()[before..];
        let (price, volume) = (instance.price_series(), instance.volume_series());
        assert!(matches!(
            calls[0],
            EngineCall::SetSeriesData { series, points: 1, .. } if series == price
        ));
        assert!(matches!(
            calls[1],
            EngineCall::SetSeriesData { series, points: 1, .. } if series == volume
        ));
        assert_eq!(calls[2], EngineCall::FitContent { chart: instance.chart() });
    }
}
