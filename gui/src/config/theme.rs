// Chart chrome colors for the light and dark themes.
use engine::options::ChromeStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub text_color: String,
    pub grid_color: String,
    pub border_color: String,
}

impl ThemePalette {
    /// Palette for the given ambient theme.
    pub fn resolve(is_dark: bool) -> Self {
        if is_dark {
            Self::default_dark()
        } else {
            Self::default_light()
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1a1a1a".to_string(),
            text_color: "#d1d5db".to_string(),
            grid_color: "#2d2d2d".to_string(),
            border_color: "#3f3f46".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text_color: "#374151".to_string(),
            grid_color: "#e5e7eb".to_string(),
            border_color: "#d1d5db".to_string(),
        }
    }

    /// Engine styling: one grid color for both line directions, one border
    /// color for both scales.
    pub fn chrome_style(&self) -> ChromeStyle {
        ChromeStyle {
            background: self.background.clone(),
            text_color: self.text_color.clone(),
            grid_color: self.grid_color.clone(),
            time_scale_border: self.border_color.clone(),
            price_scale_border: self.border_color.clone(),
        }
    }
}
