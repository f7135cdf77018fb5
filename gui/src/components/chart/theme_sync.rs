// Theme sync: restyles a live chart whenever the ambient theme changes.
use engine::{ChartEngine, ChartId, EngineError};
use tokio::sync::watch;

use super::lifecycle::ChartInstance;
use crate::config::theme::ThemePalette;
use crate::state::{ThemeMode, ThemeProvider};

/// Subscription to theme changes for one chart. Holds the chart id only;
/// the chart itself stays owned by the lifecycle.
#[derive(Debug)]
pub struct ThemeSync {
    chart: ChartId,
    receiver: Option<watch::Receiver<ThemeMode>>,
}

impl ThemeSync {
    /// Starts watching. The mode at attach time counts as seen: the chart was
    /// already styled with it on acquisition.
    pub fn attach<T: ThemeProvider + ?Sized>(instance: &ChartInstance, provider: &T) -> Self {
        Self {
            chart: instance.chart(),
            receiver: Some(provider.subscribe()),
        }
    }

    /// The latest mode if it changed since the last poll.
    pub fn poll(&mut self) -> Option<ThemeMode> {
        let receiver = self.receiver.as_mut()?;
        if matches!(receiver.has_changed(), Ok(true)) {
            Some(*receiver.borrow_and_update())
        } else {
            None
        }
    }

    /// Waits for the next change. Resolves to `None` once cancelled or when
    /// the provider is gone.
    pub async fn changed(&mut self) -> Option<ThemeMode> {
        let receiver = self.receiver.as_mut()?;
        receiver.changed().await.ok()?;
        let mode = *receiver.borrow_and_update();
        Some(mode)
    }

    /// Restyles layout, grid and scale borders for `mode`. Series data and the
    /// chart itself are left alone. Does nothing after `cancel`.
    pub fn apply<E: ChartEngine>(
        &self,
        engine: &mut E,
        mode: ThemeMode,
    ) -> Result<(), EngineError> {
        if self.is_cancelled() {
            return Ok(());
        }
        let palette = ThemePalette::resolve(mode.is_dark());
        engine.apply_style(self.chart, &palette.chrome_style())?;
        tracing::debug!(chart = %self.chart, ?mode, "Theme applied.");
        Ok(())
    }

    /// Applies a pending change, if any. Returns whether one was applied.
    pub fn sync<E: ChartEngine>(&mut self, engine: &mut E) -> Result<bool, EngineError> {
        match self.poll() {
            Some(mode) => self.apply(engine, mode).map(|_| true),
            None => Ok(false),
        }
    }

    /// Detaches from the provider. No change is observed or applied after
    /// this returns.
    pub fn cancel(&mut self) {
        self.receiver = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.receiver.is_none()
    }
}
