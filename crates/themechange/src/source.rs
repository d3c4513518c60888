//! Where theme bundles are looked up.
//!
//! A theme name maps to a bundle basename (`prefix + theme`). Loading and
//! parsing the bundles is up to the host; this module only carries the lookup
//! parameters derived from settings.

use crate::settings::{non_blank, ThemeSourceSettings, DEFAULT_ENCODING};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSourceDescriptor {
    pub basename_prefix: String,
    pub default_encoding: String,
    pub fallback_to_system_locale: bool,
}

impl Default for ThemeSourceDescriptor {
    fn default() -> Self {
        Self {
            basename_prefix: String::new(),
            default_encoding: DEFAULT_ENCODING.to_string(),
            fallback_to_system_locale: false,
        }
    }
}

impl ThemeSourceDescriptor {
    pub fn from_settings(settings: &ThemeSourceSettings) -> Self {
        Self {
            basename_prefix: settings.basename_prefix.clone().unwrap_or_default(),
            default_encoding: non_blank(Some(settings.default_encoding.as_str()))
                .unwrap_or(DEFAULT_ENCODING)
                .to_string(),
            fallback_to_system_locale: settings.fallback_to_system_locale.unwrap_or(false),
        }
    }

    /// Bundle basename for a theme, e.g. `themes/dark` with prefix `themes/`.
    pub fn basename_for(&self, theme_name: &str) -> String {
        format!("{}{}", self.basename_prefix, theme_name)
    }
}
