//! Light and dark color tables.

use aurora_vg::Rgba;

/// Environment variable selecting the theme variant on desktop builds.
pub const THEME_ENV: &str = "AURORA_THEME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    /// `dark` in any case selects the dark variant; anything else, including
    /// an unset variable, selects light.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.eq_ignore_ascii_case("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Read [`THEME_ENV`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(THEME_ENV).ok().as_deref())
    }
}

/// Resolved colors for one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeValues {
    pub background: Rgba,
    pub text: Rgba,
    pub text_disabled: Rgba,
    pub highlight: Rgba,
    pub highlight_background: Rgba,
    pub separator: Rgba,
    pub backdrop: Rgba,
    pub notification_background: Rgba,
    pub notification_text: Rgba,
    pub crash_background: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub light: ThemeValues,
    pub dark: ThemeValues,
}

impl Theme {
    /// The stock console look.
    pub fn horizon() -> Self {
        Self {
            light: ThemeValues {
                background: Rgba::rgb(235, 235, 235),
                text: Rgba::rgb(45, 45, 45),
                text_disabled: Rgba::rgb(140, 140, 140),
                highlight: Rgba::rgb(0, 193, 199),
                highlight_background: Rgba::rgb(252, 255, 248),
                separator: Rgba::rgb(45, 45, 45),
                backdrop: Rgba::new(0, 0, 0, 178),
                notification_background: Rgba::new(0, 0, 0, 178),
                notification_text: Rgba::WHITE,
                crash_background: Rgba::rgb(0, 0, 0),
            },
            dark: ThemeValues {
                background: Rgba::rgb(45, 45, 45),
                text: Rgba::WHITE,
                text_disabled: Rgba::rgb(128, 128, 128),
                highlight: Rgba::rgb(0, 255, 204),
                highlight_background: Rgba::rgb(31, 34, 39),
                separator: Rgba::rgb(255, 255, 255),
                backdrop: Rgba::new(0, 0, 0, 178),
                notification_background: Rgba::new(0, 0, 0, 178),
                notification_text: Rgba::WHITE,
                crash_background: Rgba::rgb(0, 0, 0),
            },
        }
    }

    pub fn values(&self, variant: ThemeVariant) -> &ThemeValues {
        match variant {
            ThemeVariant::Light => &self.light,
            ThemeVariant::Dark => &self.dark,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::horizon()
    }
}
