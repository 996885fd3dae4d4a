use serde::{Deserialize, Serialize};

/// Storage key for the persisted theme preference
pub const THEME_STORAGE_KEY: &str = "finance-tracker.theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted choice first, then the system preference, then light
    pub fn initial(persisted: Option<&str>, system_prefers_dark: bool) -> Self {
        persisted
            .and_then(Self::parse)
            .unwrap_or(if system_prefers_dark { Theme::Dark } else { Theme::Light })
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class set on the document root
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}
