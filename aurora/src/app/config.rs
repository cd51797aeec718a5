//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::style::Style;
use crate::theme::{Theme, ThemeVariant};

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_REPEAT_DELAY: Duration = Duration::from_millis(250);
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(83);

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title, also reported to the platform.
    pub title: String,

    pub style: Style,

    pub theme: Theme,

    /// Force a theme variant instead of asking the platform.
    pub theme_variant: Option<ThemeVariant>,

    /// Frame rate cap. 0 disables the cap.
    pub max_fps: u32,

    /// How long a button must be held before it starts repeating.
    pub repeat_delay: Duration,

    /// Time between two repeats of a held button.
    pub repeat_interval: Duration,

    /// Directory the desktop fonts are loaded from.
    pub asset_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "aurora".to_string(),
            style: Style::horizon(),
            theme: Theme::horizon(),
            theme_variant: None,
            max_fps: DEFAULT_FPS,
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
            asset_dir: Some(PathBuf::from("resources")),
        }
    }
}

impl AppConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme_variant(mut self, variant: ThemeVariant) -> Self {
        self.theme_variant = Some(variant);
        self
    }

    pub fn max_fps(mut self, fps: u32) -> Self {
        self.max_fps = fps;
        self
    }

    pub fn repeat(mut self, delay: Duration, interval: Duration) -> Self {
        self.repeat_delay = delay;
        self.repeat_interval = interval;
        self
    }

    pub fn asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    /// Don't load fonts from disk.
    pub fn without_assets(mut self) -> Self {
        self.asset_dir = None;
        self
    }
}
