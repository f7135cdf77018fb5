// Ambient signals the chart observes: the global theme and its container.
pub mod ambient_theme;
pub mod container;

pub use ambient_theme::{AmbientTheme, ThemeMode, ThemeProvider};
pub use container::Container;
