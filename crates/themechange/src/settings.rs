//! Settings for theme change wiring.
//!
//! Settings live under the [`PROPERTIES_PREFIX`] namespace of a YAML or JSON
//! document. Keys are kebab-case; every key is optional.
//!
//! ```rust
//! use themechange::{Settings, ThemeResolverType};
//!
//! let settings = Settings::from_yaml(r#"
//! theme-change:
//!   theme-resolver-type: session
//!   session-theme-resolver:
//!     default-theme-name: light
//!   model-and-view:
//!     tag-names:
//!       dark: Dark Theme
//!       light: Light Theme
//! "#).unwrap();
//!
//! assert_eq!(settings.theme_resolver_type, ThemeResolverType::Session);
//! assert_eq!(settings.model_and_view.tag_names.len(), 2);
//! ```
//!
//! A document without the namespace yields [`Settings::default`].

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Namespace of the settings inside a configuration document.
///
/// A top-level key: documents that nest it under an application namespace
/// must pass the nested section to the loaders.
pub const PROPERTIES_PREFIX: &str = "theme-change";

/// Attribute name under which tag names are exposed to views by default.
pub const DEFAULT_VIEW_ATTRIBUTE: &str = "themeChangeTagNames";

/// Query parameter that switches the theme by default.
pub const DEFAULT_PARAM_NAME: &str = "theme";

/// Pattern matching every request path.
pub const MATCH_ALL_PATHS: &str = "/**";

/// Charset used for theme bundles by default.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Cookie carrying the theme name by default.
pub const DEFAULT_COOKIE_NAME: &str = "THEME_RESOLVER_THEME";

/// Cookie path by default.
pub const DEFAULT_COOKIE_PATH: &str = "/";

/// Strategy used to determine the active theme of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeResolverType {
    /// Theme name stored in a cookie.
    #[default]
    #[serde(alias = "COOKIE")]
    Cookie,
    /// Theme name stored in the session.
    #[serde(alias = "SESSION")]
    Session,
    /// Single theme for every request.
    #[serde(alias = "FIXED")]
    Fixed,
}

impl ThemeResolverType {
    /// Lowercase name, as written in settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeResolverType::Cookie => "cookie",
            ThemeResolverType::Session => "session",
            ThemeResolverType::Fixed => "fixed",
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Whether any theme change wiring happens at all.
    pub enabled: bool,
    /// Tag names exposed to views.
    pub model_and_view: ModelAndViewSettings,
    /// Query-parameter theme switching.
    pub theme_interceptor: ThemeInterceptorSettings,
    /// Theme bundle lookup.
    pub theme_source: ThemeSourceSettings,
    /// Which resolver strategy is active.
    pub theme_resolver_type: ThemeResolverType,
    /// Used when `theme_resolver_type` is cookie.
    pub cookie_theme_resolver: CookieThemeResolverSettings,
    /// Used when `theme_resolver_type` is session.
    pub session_theme_resolver: SessionThemeResolverSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            model_and_view: ModelAndViewSettings::default(),
            theme_interceptor: ThemeInterceptorSettings::default(),
            theme_source: ThemeSourceSettings::default(),
            theme_resolver_type: ThemeResolverType::default(),
            cookie_theme_resolver: CookieThemeResolverSettings::default(),
            session_theme_resolver: SessionThemeResolverSettings::default(),
        }
    }
}

/// Path scoping shared by both interceptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InterceptorPaths {
    /// Ant-style patterns the interceptor applies to. Must not be empty.
    pub intercept_paths: Vec<String>,
    /// Ant-style patterns carved out of `intercept_paths`.
    pub exclude_paths: Vec<String>,
    /// Relative priority among interceptors; lower runs first.
    pub interceptor_order: Option<i32>,
}

impl Default for InterceptorPaths {
    fn default() -> Self {
        Self {
            intercept_paths: vec![MATCH_ALL_PATHS.to_string()],
            exclude_paths: Vec::new(),
            interceptor_order: None,
        }
    }
}

/// Settings of the view interceptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ModelAndViewSettings {
    /// Model attribute receiving the tag map.
    pub view_attribute: String,
    /// Translate tag names through the message source when `Some(true)`.
    pub tag_multilingual: Option<bool>,
    /// Theme tag to display name (or message key), in display order.
    pub tag_names: IndexMap<String, String>,
    #[serde(flatten)]
    pub paths: InterceptorPaths,
}

impl Default for ModelAndViewSettings {
    fn default() -> Self {
        Self {
            view_attribute: DEFAULT_VIEW_ATTRIBUTE.to_string(),
            tag_multilingual: None,
            tag_names: IndexMap::new(),
            paths: InterceptorPaths::default(),
        }
    }
}

/// Settings of the theme switch interceptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThemeInterceptorSettings {
    /// Query parameter carrying the new theme name.
    pub param_name: String,
    #[serde(flatten)]
    pub paths: InterceptorPaths,
}

impl Default for ThemeInterceptorSettings {
    fn default() -> Self {
        Self {
            param_name: DEFAULT_PARAM_NAME.to_string(),
            paths: InterceptorPaths::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThemeSourceSettings {
    /// Prefix applied to every theme bundle basename.
    pub basename_prefix: Option<String>,
    /// Charset of theme bundle files.
    pub default_encoding: String,
    /// Fall back to the system locale when no bundle matches the request locale.
    pub fallback_to_system_locale: Option<bool>,
}

impl Default for ThemeSourceSettings {
    fn default() -> Self {
        Self {
            basename_prefix: None,
            default_encoding: DEFAULT_ENCODING.to_string(),
            fallback_to_system_locale: None,
        }
    }
}

/// Cookie resolver settings. Unset flags take their defaults at selection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CookieThemeResolverSettings {
    pub cookie_name: String,
    pub cookie_path: String,
    /// RFC 2109 domain.
    pub cookie_domain: Option<String>,
    /// Negative: not persisted; zero: deletes the cookie.
    pub cookie_max_age: Option<i32>,
    /// Defaults to false.
    pub cookie_http_only: Option<bool>,
    /// Defaults to false.
    pub cookie_secure: Option<bool>,
    /// Defaults to true.
    pub language_tag_compliant: Option<bool>,
    /// Defaults to true.
    pub reject_invalid_cookies: Option<bool>,
    pub default_theme_name: Option<String>,
}

impl Default for CookieThemeResolverSettings {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_path: DEFAULT_COOKIE_PATH.to_string(),
            cookie_domain: None,
            cookie_max_age: None,
            cookie_http_only: None,
            cookie_secure: None,
            language_tag_compliant: None,
            reject_invalid_cookies: None,
            default_theme_name: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionThemeResolverSettings {
    pub default_theme_name: Option<String>,
}

impl Settings {
    /// Loads settings from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let root: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        match root.get(PROPERTIES_PREFIX) {
            None | Some(serde_yaml::Value::Null) => Ok(Self::default()),
            Some(section) => Ok(serde_yaml::from_value(section.clone())?),
        }
    }

    /// Loads settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let root: serde_json::Value = serde_json::from_str(json)?;
        match root.get(PROPERTIES_PREFIX) {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(section) => Ok(serde_json::from_value(section.clone())?),
        }
    }

    /// Loads settings from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let load: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        load(&content)
    }
}

/// Returns the trimmed value when it holds any non-whitespace character.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
