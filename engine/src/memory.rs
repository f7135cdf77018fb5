// Headless arena engine: keeps every chart's state in memory, journals each
// call, and renders charts to SVG on request.
use std::collections::HashMap;

use serde::Serialize;

use crate::chart::{ChartEngine, ChartId, SeriesId};
use crate::error::EngineError;
use crate::options::{ChartOptions, ChromeStyle, SeriesData, SeriesKind, SeriesOptions, Size};
use crate::svg;

/// One successful engine call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineCall {
    CreateChart { chart: ChartId, size: Size },
    AddSeries { chart: ChartId, series: SeriesId, kind: SeriesKind },
    ApplyStyle { chart: ChartId, style: ChromeStyle },
    Resize { chart: ChartId, size: Size },
    SetSeriesData { series: SeriesId, kind: SeriesKind, points: usize },
    FitContent { chart: ChartId },
    RemoveChart { chart: ChartId },
}

/// Inclusive range on the time axis, in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub fn contains(&self, t: i64) -> bool {
        t >= self.from && t <= self.to
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesState {
    pub id: SeriesId,
    pub options: SeriesOptions,
    pub data: SeriesData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartState {
    pub id: ChartId,
    pub options: ChartOptions,
    pub series: Vec<SeriesState>,
    /// `None` until something frames the view; the renderer then shows all data.
    pub visible_range: Option<TimeRange>,
}

impl ChartState {
    pub fn series(&self, id: SeriesId) -> Option<&SeriesState> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Time range spanned by every point of every series.
    pub fn data_range(&self) -> Option<TimeRange> {
        self.series
            .iter()
            .filter_map(|s| s.data.time_bounds())
            .fold(None, |acc, (from, to)| match acc {
                Some(TimeRange { from: f, to: t }) => Some(TimeRange {
                    from: f.min(from),
                    to: t.max(to),
                }),
                None => Some(TimeRange { from, to }),
            })
    }
}

#[derive(Debug, Default)]
pub struct MemoryEngine {
    charts: HashMap<ChartId, ChartState>,
    owners: HashMap<SeriesId, ChartId>,
    journal: Vec<EngineCall>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(&self, id: ChartId) -> Option<&ChartState> {
        self.charts.get(&id)
    }

    pub fn series(&self, id: SeriesId) -> Option<&SeriesState> {
        let chart = self.owners.get(&id)?;
        self.charts.get(chart)?.series(id)
    }

    /// Number of charts created and not yet removed.
    pub fn live_charts(&self) -> usize {
        self.charts.len()
    }

    pub fn journal(&self) -> &[EngineCall] {
        &self.journal
    }

    /// How many `fit_content` calls the journal holds for `chart`, removed or not.
    pub fn fit_count(&self, chart: ChartId) -> usize {
        self.journal
            .iter()
            .filter(|call| matches!(call, EngineCall::FitContent { chart: c } if *c == chart))
            .count()
    }

    /// What a user pan or zoom does: moves the view without touching data.
    pub fn set_visible_range(
        &mut self,
        chart: ChartId,
        range: TimeRange,
    ) -> Result<(), EngineError> {
        self.chart_mut(chart)?.visible_range = Some(range);
        Ok(())
    }

    pub fn render_svg(&self, chart: ChartId) -> Result<String, EngineError> {
        let state = self.charts.get(&chart).ok_or(EngineError::UnknownChart(chart))?;
        Ok(svg::render(state))
    }

    fn chart_mut(&mut self, chart: ChartId) -> Result<&mut ChartState, EngineError> {
        self.charts.get_mut(&chart).ok_or(EngineError::UnknownChart(chart))
    }

    fn series_mut(&mut self, series: SeriesId) -> Result<&mut SeriesState, EngineError> {
        let chart = *self.owners.get(&series).ok_or(EngineError::UnknownSeries(series))?;
        self.chart_mut(chart)?
            .series
            .iter_mut()
            .find(|s| s.id == series)
            .ok_or(EngineError::UnknownSeries(series))
    }
}

impl ChartEngine for MemoryEngine {
    fn create_chart(&mut self, options: &ChartOptions) -> Result<ChartId, EngineError> {
        let id = ChartId::new();
        self.charts.insert(
            id,
            ChartState {
                id,
                options: options.clone(),
                series: Vec::new(),
                visible_range: None,
            },
        );
        self.journal.push(EngineCall::CreateChart { chart: id, size: options.size });
        tracing::debug!(chart = %id, size = %options.size, "Chart created.");
        Ok(id)
    }

    fn add_series(
        &mut self,
        chart: ChartId,
        options: SeriesOptions,
    ) -> Result<SeriesId, EngineError> {
        let id = SeriesId::new();
        let kind = options.kind();
        self.chart_mut(chart)?.series.push(SeriesState {
            id,
            data: SeriesData::empty_for(kind),
            options,
        });
        self.owners.insert(id, chart);
        self.journal.push(EngineCall::AddSeries { chart, series: id, kind });
        Ok(id)
    }

    fn apply_style(&mut self, chart: ChartId, style: &ChromeStyle) -> Result<(), EngineError> {
        self.chart_mut(chart)?.options.style = style.clone();
        self.journal.push(EngineCall::ApplyStyle { chart, style: style.clone() });
        Ok(())
    }

    fn resize(&mut self, chart: ChartId, size: Size) -> Result<(), EngineError> {
        self.chart_mut(chart)?.options.size = size;
        self.journal.push(EngineCall::Resize { chart, size });
        Ok(())
    }

    fn set_series_data(&mut self, series: SeriesId, data: SeriesData) -> Result<(), EngineError> {
        let state = self.series_mut(series)?;
        let expected = state.options.kind();
        if data.kind() != expected {
            return Err(EngineError::SeriesKindMismatch { series, expected });
        }
        let points = data.len();
        state.data = data;
        self.journal.push(EngineCall::SetSeriesData { series, kind: expected, points });
        Ok(())
    }

    fn fit_content(&mut self, chart: ChartId) -> Result<(), EngineError> {
        let state = self.chart_mut(chart)?;
        state.visible_range = state.data_range();
        self.journal.push(EngineCall::FitContent { chart });
        Ok(())
    }

    fn remove_chart(&mut self, chart: ChartId) -> Result<(), EngineError> {
        let state = self.charts.remove(&chart).ok_or(EngineError::UnknownChart(chart))?;
        for series in &state.series {
            self.owners.remove(&series.id);
        }
        self.journal.push(EngineCall::RemoveChart { chart });
        tracing::debug!(chart = %chart, "Chart removed.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CandlestickOptions, HistogramOptions};
    use shared::chart::{CandlestickPoint, UtcTimestamp, VolumePoint, VOLUME_UP_COLOR};

    fn options() -> ChartOptions {
        ChartOptions {
            size: Size::new(800, 600),
            style: ChromeStyle {
                background: "#ffffff".to_string(),
                text_color: "#374151".to_string(),
                grid_color: "#e5e7eb".to_string(),
                time_scale_border: "#d1d5db".to_string(),
                price_scale_border: "#d1d5db".to_string(),
            },
        }
    }

    fn candle(t: i64) -> CandlestickPoint {
        CandlestickPoint { time: UtcTimestamp(t), open: 10.0, high: 12.0, low: 9.0, close: 11.0 }
    }

    fn volume(t: i64) -> VolumePoint {
        VolumePoint { time: UtcTimestamp(t), value: 100, color: VOLUME_UP_COLOR }
    }

    #[test]
    fn test_series_data_replaces_whole_set() {
        let mut engine = MemoryEngine::new();
        let chart = engine.create_chart(&options()).unwrap();
        let series = engine
            .add_series(chart, SeriesOptions::Candlestick(CandlestickOptions::default()))
            .unwrap();

        engine
            .set_series_data(series, SeriesData::Candlestick(vec![candle(1), candle(2)]))
            .unwrap();
        engine.set_series_data(series, SeriesData::Candlestick(vec![candle(3)])).unwrap();

        assert_eq!(engine.series(series).unwrap().data, SeriesData::Candlestick(vec![candle(3)]));
    }

    #[test]
    fn test_series_kind_mismatch_is_rejected() {
        let mut engine = MemoryEngine::new();
        let chart = engine.create_chart(&options()).unwrap();
        let series = engine
            .add_series(chart, SeriesOptions::Histogram(HistogramOptions::default()))
            .unwrap();

        let err = engine
            .set_series_data(series, SeriesData::Candlestick(vec![candle(1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::SeriesKindMismatch { expected: SeriesKind::Histogram, .. }
        ));
    }

    #[test]
    fn test_fit_content_frames_all_series() {
        let mut engine = MemoryEngine::new();
        let chart = engine.create_chart(&options()).unwrap();
        let price = engine
            .add_series(chart, SeriesOptions::Candlestick(CandlestickOptions::default()))
            .unwrap();
        let vol = engine
            .add_series(chart, SeriesOptions::Histogram(HistogramOptions::default()))
            .unwrap();
        engine
            .set_series_data(price, SeriesData::Candlestick(vec![candle(10), candle(20)]))
            .unwrap();
        engine.set_series_data(vol, SeriesData::Histogram(vec![volume(5)])).unwrap();

        engine.fit_content(chart).unwrap();

        let state = engine.chart(chart).unwrap();
        assert_eq!(state.visible_range, Some(TimeRange { from: 5, to: 20 }));
        assert_eq!(engine.fit_count(chart), 1);
    }

    #[test]
    fn test_data_updates_keep_visible_range() {
        let mut engine = MemoryEngine::new();
        let chart = engine.create_chart(&options()).unwrap();
        let price = engine
            .add_series(chart, SeriesOptions::Candlestick(CandlestickOptions::default()))
            .unwrap();
        engine.set_visible_range(chart, TimeRange { from: 100, to: 200 }).unwrap();

        engine.set_series_data(price, SeriesData::Candlestick(vec![candle(1)])).unwrap();

        assert_eq!(
            engine.chart(chart).unwrap().visible_range,
            Some(TimeRange { from: 100, to: 200 })
        );
    }

    #[test]
    fn test_remove_chart_invalidates_series() {
        let mut engine = MemoryEngine::new();
        let chart = engine.create_chart(&options()).unwrap();
        let series = engine
            .add_series(chart, SeriesOptions::Candlestick(CandlestickOptions::default()))
            .unwrap();

        engine.remove_chart(chart).unwrap();

        assert_eq!(engine.live_charts(), 0);
        assert!(matches!(engine.resize(chart, Size::new(1, 1)), Err(EngineError::UnknownChart(_))));
        assert!(matches!(
            engine.set_series_data(series, SeriesData::Candlestick(Vec::new())),
            Err(EngineError::UnknownSeries(_))
        ));
        assert!(matches!(engine.remove_chart(chart), Err(EngineError::UnknownChart(_))));
    }

    #[test]
    fn test_journal_records_call_order() {
        let mut engine = MemoryEngine::new();
        let chart = engine.create_chart(&options()).unwrap();
        engine.resize(chart, Size::new(640, 480)).unwrap();
        engine.fit_content(chart).unwrap();
        engine.remove_chart(chart).unwrap();

        assert_eq!(
            engine.journal(),
            &[
                EngineCall::CreateChart { chart, size: Size::new(800, 600) },
                EngineCall::Resize { chart, size: Size::new(640, 480) },
                EngineCall::FitContent { chart },
                EngineCall::RemoveChart { chart },
            ]
        );
    }
}
