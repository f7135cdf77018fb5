// Candlestick chart component: price candles over a volume histogram, kept in
// sync with its bars, the ambient theme and its container size.
use engine::options::Size;
use engine::{ChartEngine, ChartId, EngineError};
use shared::models::Bar;

use super::data_sync::{DataSync, FitState, SyncOutcome};
use super::lifecycle::{acquire, release, ChartInstance, SeriesLayout};
use super::size_sync::SizeSync;
use super::theme_sync::ThemeSync;
use crate::config::theme::ThemePalette;
use crate::state::{Container, ThemeMode, ThemeProvider};

/// Inputs the host passes on every render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartProps {
    /// Ordered ascending by timestamp; never re-sorted here.
    pub bars: Vec<Bar>,
    /// Passed through untouched for the host's styling.
    pub class_name: Option<String>,
}

/// A change observed on one of the ambient sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Theme(ThemeMode),
    Resize(Size),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
    ThemeObserverCancelled,
    SizeObserverCancelled,
    Released(ChartId),
}

/// What `unmount` did, in the order it did it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teardown {
    pub steps: Vec<TeardownStep>,
}

/// One mounted chart. Owns the chart instance and both observers for the
/// lifetime of the mount.
#[derive(Debug)]
pub struct CandlestickChart {
    instance: ChartInstance,
    theme_sync: ThemeSync,
    size_sync: SizeSync,
    data_sync: DataSync,
    class_name: Option<String>,
}

impl CandlestickChart {
    /// Acquires the chart, attaches the theme and size observers, then pushes
    /// the first bars. Without a container nothing happens and `Ok(None)`
    /// comes back.
    pub fn mount<E, T>(
        engine: &mut E,
        container: Option<&Container>,
        theme: &T,
        layout: &SeriesLayout,
        props: ChartProps,
    ) -> Result<Option<Self>, EngineError>
    where
        E: ChartEngine,
        T: ThemeProvider + ?Sized,
    {
        let palette = ThemePalette::resolve(theme.mode().is_dark());
        let acquired = acquire(engine, container, &palette, layout)?;
        let (Some(container), Some(instance)) = (container, acquired) else {
            return Ok(None);
        };

        let theme_sync = ThemeSync::attach(&instance, theme);
        let size_sync = SizeSync::attach(&instance, container);
        let mut chart = Self {
            instance,
            theme_sync,
            size_sync,
            data_sync: DataSync::new(),
            class_name: None,
        };

        if let Err(err) = chart.update(engine, props) {
            tracing::error!(
                chart = %chart.instance.chart(),
                error = %err,
                "Initial data push failed; tearing down."
            );
            if let Err(teardown_err) = chart.unmount(engine) {
                tracing::error!(error = %teardown_err, "Teardown after failed mount also failed.");
            }
            return Err(err);
        }

        tracing::info!(chart = %chart.instance.chart(), "Candlestick chart mounted.");
        Ok(Some(chart))
    }

    /// New props from the host. Only the data path runs; the chart is never
    /// recreated here.
    pub fn update<E: ChartEngine>(
        &mut self,
        engine: &mut E,
        props: ChartProps,
    ) -> Result<SyncOutcome, EngineError> {
        self.class_name = props.class_name;
        self.data_sync.apply(engine, &self.instance, &props.bars)
    }

    /// Waits for the next theme or size change. Pending forever once both
    /// observers are cancelled or their sources are gone.
    pub async fn next_signal(&mut self) -> Signal {
        let theme = &mut self.theme_sync;
        let size = &mut self.size_sync;
        tokio::select! {
            Some(mode) = theme.changed() => Signal::Theme(mode),
            Some(dims) = size.changed() => Signal::Resize(dims),
            else => std::future::pending::<Signal>().await,
        }
    }

    pub fn apply_signal<E: ChartEngine>(
        &mut self,
        engine: &mut E,
        signal: Signal,
    ) -> Result<(), EngineError> {
        match signal {
            Signal::Theme(mode) => self.theme_sync.apply(engine, mode),
            Signal::Resize(size) => self.size_sync.apply(engine, size).map(|_| ()),
        }
    }

    /// Applies whatever theme and size changes are pending, without waiting.
    /// Returns how many were applied.
    pub fn pump<E: ChartEngine>(&mut self, engine: &mut E) -> Result<usize, EngineError> {
        let themed = self.theme_sync.sync(engine)?;
        let resized = self.size_sync.sync(engine)?;
        Ok(usize::from(themed) + usize::from(resized))
    }

    pub fn instance(&self) -> &ChartInstance {
        &self.instance
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn fit_state(&self) -> FitState {
        self.data_sync.fit_state()
    }

    /// Cancels the theme observer, then the size observer, then releases the
    /// chart. Consumes the component, so nothing can reach the chart after.
    pub fn unmount<E: ChartEngine>(mut self, engine: &mut E) -> Result<Teardown, EngineError> {
        let mut steps = Vec::with_capacity(3);

        self.theme_sync.cancel();
        steps.push(TeardownStep::ThemeObserverCancelled);
        self.size_sync.cancel();
        steps.push(TeardownStep::SizeObserverCancelled);

        let chart = release(engine, self.instance)?;
        steps.push(TeardownStep::Released(chart));

        tracing::info!(chart = %chart, "Candlestick chart unmounted.");
        Ok(Teardown { steps })
    }
}
