//! Error types for theme change wiring.
//!
//! Two error classes exist. [`ConfigError`] is raised while settings are loaded
//! or interceptors are registered, and aborts startup. [`InterceptError`] is
//! raised by an interceptor while a request is handled and is handed back to
//! the host. Missing translations and unrenderable views are not errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Startup-time configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An interceptor was registered without any path to intercept.
    #[error("interceptor '{interceptor}' requires at least one intercept path")]
    EmptyInterceptPaths { interceptor: String },

    /// A path pattern could not be compiled.
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPathPattern { pattern: String, reason: String },

    /// The settings file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings document is malformed or holds an invalid value.
    #[error("invalid settings: {0}")]
    Parse(String),

    /// The settings file extension is not one of yaml, yml or json.
    #[error("unsupported settings format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Request-time failures raised by an interceptor.
#[derive(Debug, Error)]
pub enum InterceptError {
    /// The active resolver does not allow the theme to be changed.
    #[error("the {resolver} theme resolver does not support changing the theme")]
    UnsupportedThemeChange { resolver: &'static str },

    /// The requested theme name cannot be stored by the active resolver.
    #[error("invalid theme name {name:?}: only letters, digits, '.', '_' and '-' are allowed")]
    InvalidThemeName { name: String },
}

/// Render-time failures of a [`ModelAndView`](crate::ModelAndView).
#[derive(Debug, Error)]
pub enum ViewError {
    /// Redirect targets carry no template.
    #[error("view '{0}' is a redirect and cannot be rendered")]
    NotRenderable(String),

    /// The template engine rejected the template or its context.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type for startup configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;
