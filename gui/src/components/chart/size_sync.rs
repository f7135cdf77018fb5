// Size sync: keeps a live chart the same size as its container.
use engine::options::Size;
use engine::{ChartEngine, ChartId, EngineError};
use tokio::sync::watch;

use super::lifecycle::ChartInstance;
use crate::state::Container;

#[derive(Debug)]
pub struct SizeSync {
    chart: ChartId,
    receiver: Option<watch::Receiver<Size>>,
    applied: Size,
}

impl SizeSync {
    pub fn attach(instance: &ChartInstance, container: &Container) -> Self {
        Self {
            chart: instance.chart(),
            receiver: Some(container.observe()),
            applied: container.rendered_size(),
        }
    }

    pub fn poll(&mut self) -> Option<Size> {
        let receiver = self.receiver.as_mut()?;
        if matches!(receiver.has_changed(), Ok(true)) {
            Some(*receiver.borrow_and_update())
        } else {
            None
        }
    }

    pub async fn changed(&mut self) -> Option<Size> {
        let receiver = self.receiver.as_mut()?;
        receiver.changed().await.ok()?;
        let size = *receiver.borrow_and_update();
        Some(size)
    }

    /// Resizes the chart. Sizes with a zero dimension are skipped and the
    /// chart keeps its last size. Returns whether the chart was resized.
    pub fn apply<E: ChartEngine>(
        &mut self,
        engine: &mut E,
        size: Size,
    ) -> Result<bool, EngineError> {
        if self.is_cancelled() {
            return Ok(false);
        }
        if size.is_empty() {
            tracing::warn!(
                chart = %self.chart,
                %size,
                kept = %self.applied,
                "Ignoring empty container size."
            );
            return Ok(false);
        }
        engine.resize(self.chart, size)?;
        self.applied = size;
        tracing::debug!(chart = %self.chart, %size, "Chart resized.");
        Ok(true)
    }

    pub fn sync<E: ChartEngine>(&mut self, engine: &mut E) -> Result<bool, EngineError> {
        match self.poll() {
            Some(size) => self.apply(engine, size),
            None => Ok(false),
        }
    }

    /// Last size handed to the engine.
    pub fn applied(&self) -> Size {
        self.applied
    }

    pub fn cancel(&mut self) {
        self.receiver = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.receiver.is_none()
    }
}
