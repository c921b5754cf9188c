//! Theme preference.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The color scheme reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// The user's theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the device color scheme.
    #[default]
    System,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse a mode name. Returns `None` for anything else.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Read a stored preference. Both the JSON string (`"dark"`) and the
    /// bare word (`dark`) are accepted; anything unrecognized is `System`.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        serde_json::from_str::<String>(raw)
            .ok()
            .and_then(|s| Self::parse(&s))
            .or_else(|| Self::parse(raw))
            .unwrap_or_default()
    }

    /// Whether dark colors apply given the device scheme.
    #[must_use]
    pub fn is_dark(self, system: ColorScheme) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::System => system == ColorScheme::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
