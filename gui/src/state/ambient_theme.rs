use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Read access to the app-wide theme plus a stream of its changes.
pub trait ThemeProvider {
    fn mode(&self) -> ThemeMode;

    /// A receiver that has already seen the current mode and wakes on the
    /// next change.
    fn subscribe(&self) -> watch::Receiver<ThemeMode>;
}

/// The root-level theme indicator. Every `set` is a mutation and notifies
/// subscribers, even when the mode does not change.
#[derive(Debug)]
pub struct AmbientTheme {
    sender: watch::Sender<ThemeMode>,
}

impl AmbientTheme {
    pub fn new(mode: ThemeMode) -> Self {
        let (sender, _) = watch::channel(mode);
        Self { sender }
    }

    pub fn set(&self, mode: ThemeMode) {
        tracing::debug!(?mode, "Ambient theme set.");
        self.sender.send_replace(mode);
    }

    pub fn toggle(&self) -> ThemeMode {
        let next = if self.mode().is_dark() {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        };
        self.set(next);
        next
    }

    /// Live subscriptions, i.e. observers not yet cancelled.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ThemeProvider for AmbientTheme {
    fn mode(&self) -> ThemeMode {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.sender.subscribe()
    }
}
