//! Theme resolution strategies and their selection.
//!
//! Exactly one strategy is active per process. [`select_resolver`] reads the
//! configured [`ThemeResolverType`] once at startup and produces a
//! [`ResolverSelection`] carrying that strategy's configuration, with every
//! default applied. [`ResolverSelection::build`] turns it into the shared
//! [`ThemeResolver`] used by request handlers.
//!
//! ```text
//! Settings.theme_resolver_type
//!   ├── cookie  → Cookie(CookieResolverConfig)  → CookieThemeResolver
//!   ├── session → Session(SessionResolverConfig) → SessionThemeResolver
//!   └── fixed   → Fixed                          → FixedThemeResolver
//! ```

mod cookie;
mod fixed;
mod session;

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::InterceptError;
use crate::request::RequestContext;
use crate::settings::{
    non_blank, Settings, ThemeResolverType, DEFAULT_COOKIE_NAME, DEFAULT_COOKIE_PATH,
};

pub use cookie::CookieThemeResolver;
pub use fixed::FixedThemeResolver;
pub use session::SessionThemeResolver;

/// Theme used when nothing else names one.
pub const ORIGINAL_DEFAULT_THEME_NAME: &str = "theme";

/// Request attribute caching the theme chosen during the current request.
pub const THEME_REQUEST_ATTRIBUTE_NAME: &str = "theme-change.THEME";

/// Session attribute holding the theme of the session strategy.
pub const THEME_SESSION_ATTRIBUTE_NAME: &str = "theme-change.SESSION_THEME";

/// Determines and changes the active theme of a request.
pub trait ThemeResolver: Send + Sync + Debug {
    /// Theme name for the request; never empty.
    fn resolve_theme_name(&self, request: &dyn RequestContext) -> String;

    /// Changes the theme for this and subsequent requests. `None` or a blank
    /// name restores the default.
    fn set_theme_name(
        &self,
        request: &mut dyn RequestContext,
        theme_name: Option<&str>,
    ) -> Result<(), InterceptError>;

    /// Strategy name used in logs and errors.
    fn kind(&self) -> ThemeResolverType;
}

/// Cookie strategy configuration with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieResolverConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_domain: Option<String>,
    pub cookie_max_age: Option<i32>,
    pub http_only: bool,
    pub secure: bool,
    pub language_tag_compliant: bool,
    pub reject_invalid_cookies: bool,
    pub default_theme_name: Option<String>,
}

impl Default for CookieResolverConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_path: DEFAULT_COOKIE_PATH.to_string(),
            cookie_domain: None,
            cookie_max_age: None,
            http_only: false,
            secure: false,
            language_tag_compliant: true,
            reject_invalid_cookies: true,
            default_theme_name: None,
        }
    }
}

/// Session strategy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResolverConfig {
    pub default_theme_name: Option<String>,
}

/// The single strategy chosen at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverSelection {
    Cookie(CookieResolverConfig),
    Session(SessionResolverConfig),
    Fixed,
}

impl ResolverSelection {
    pub fn kind(&self) -> ThemeResolverType {
        match self {
            ResolverSelection::Cookie(_) => ThemeResolverType::Cookie,
            ResolverSelection::Session(_) => ThemeResolverType::Session,
            ResolverSelection::Fixed => ThemeResolverType::Fixed,
        }
    }

    /// Builds the resolver shared by all request handlers.
    pub fn build(&self) -> Arc<dyn ThemeResolver> {
        match self {
            ResolverSelection::Cookie(config) => {
                Arc::new(CookieThemeResolver::new(config.clone()))
            }
            ResolverSelection::Session(config) => {
                Arc::new(SessionThemeResolver::new(config.clone()))
            }
            ResolverSelection::Fixed => Arc::new(FixedThemeResolver::new()),
        }
    }
}

/// Picks the theme resolution strategy named by the settings.
///
/// Blank strings count as unset. Only the branch that is selected reads its
/// settings group; the others are ignored.
pub fn select_resolver(settings: &Settings) -> ResolverSelection {
    match settings.theme_resolver_type {
        ThemeResolverType::Cookie => {
            let props = &settings.cookie_theme_resolver;
            let defaults = CookieResolverConfig::default();
            ResolverSelection::Cookie(CookieResolverConfig {
                cookie_name: non_blank(Some(props.cookie_name.as_str()))
                    .map(str::to_string)
                    .unwrap_or(defaults.cookie_name),
                cookie_path: non_blank(Some(props.cookie_path.as_str()))
                    .map(str::to_string)
                    .unwrap_or(defaults.cookie_path),
                cookie_domain: non_blank(props.cookie_domain.as_deref()).map(str::to_string),
                cookie_max_age: props.cookie_max_age,
                http_only: props.cookie_http_only.unwrap_or(defaults.http_only),
                secure: props.cookie_secure.unwrap_or(defaults.secure),
                language_tag_compliant: props
                    .language_tag_compliant
                    .unwrap_or(defaults.language_tag_compliant),
                reject_invalid_cookies: props
                    .reject_invalid_cookies
                    .unwrap_or(defaults.reject_invalid_cookies),
                default_theme_name: non_blank(props.default_theme_name.as_deref())
                    .map(str::to_string),
            })
        }
        ThemeResolverType::Session => ResolverSelection::Session(SessionResolverConfig {
            default_theme_name: non_blank(
                settings.session_theme_resolver.default_theme_name.as_deref(),
            )
            .map(str::to_string),
        }),
        ThemeResolverType::Fixed => ResolverSelection::Fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CookieThemeResolverSettings;

    fn settings_with(kind: ThemeResolverType) -> Settings {
        Settings {
            theme_resolver_type: kind,
            ..Default::default()
        }
    }

    #[test]
    fn default_selection_is_cookie() {
        let selection = select_resolver(&Settings::default());
        assert_eq!(selection.kind(), ThemeResolverType::Cookie);
    }

    #[test]
    fn cookie_flags_default_without_overrides() {
        let ResolverSelection::Cookie(config) = select_resolver(&Settings::default()) else {
            panic!("expected cookie selection");
        };
        assert!(!config.http_only);
        assert!(!config.secure);
        assert!(config.language_tag_compliant);
        assert!(config.reject_invalid_cookies);
        assert_eq!(config.cookie_name, DEFAULT_COOKIE_NAME);
        assert_eq!(config.cookie_path, "/");
        assert_eq!(config.cookie_domain, None);
        assert_eq!(config.cookie_max_age, None);
    }

    #[test]
    fn cookie_blank_strings_fall_back() {
        let mut settings = settings_with(ThemeResolverType::Cookie);
        settings.cookie_theme_resolver = CookieThemeResolverSettings {
            cookie_name: "  ".into(),
            cookie_path: String::new(),
            cookie_domain: Some(" ".into()),
            default_theme_name: Some("".into()),
            ..Default::default()
        };

        assert_eq!(
            select_resolver(&settings),
            ResolverSelection::Cookie(CookieResolverConfig::default())
        );
    }

    #[test]
    fn cookie_overrides_are_carried() {
        let mut settings = settings_with(ThemeResolverType::Cookie);
        settings.cookie_theme_resolver = CookieThemeResolverSettings {
            cookie_name: "skin".into(),
            cookie_path: "/app".into(),
            cookie_domain: Some("example.com".into()),
            cookie_max_age: Some(60),
            cookie_http_only: Some(true),
            cookie_secure: Some(true),
            language_tag_compliant: Some(false),
            reject_invalid_cookies: Some(false),
            default_theme_name: Some("light".into()),
        };

        let ResolverSelection::Cookie(config) = select_resolver(&settings) else {
            panic!("expected cookie selection");
        };
        assert_eq!(config.cookie_name, "skin");
        assert_eq!(config.cookie_path, "/app");
        assert_eq!(config.cookie_domain.as_deref(), Some("example.com"));
        assert_eq!(config.cookie_max_age, Some(60));
        assert!(config.http_only);
        assert!(config.secure);
        assert!(!config.language_tag_compliant);
        assert!(!config.reject_invalid_cookies);
        assert_eq!(config.default_theme_name.as_deref(), Some("light"));
    }

    #[test]
    fn session_carries_default_theme_only() {
        let mut settings = settings_with(ThemeResolverType::Session);
        settings.session_theme_resolver.default_theme_name = Some("light".into());
        // Cookie settings are ignored by the session branch.
        settings.cookie_theme_resolver.cookie_name = "ignored".into();

        assert_eq!(
            select_resolver(&settings),
            ResolverSelection::Session(SessionResolverConfig {
                default_theme_name: Some("light".into())
            })
        );
    }

    #[test]
    fn fixed_carries_nothing() {
        let selection = select_resolver(&settings_with(ThemeResolverType::Fixed));
        assert_eq!(selection, ResolverSelection::Fixed);
    }

    #[test]
    fn build_matches_kind() {
        for kind in [
            ThemeResolverType::Cookie,
            ThemeResolverType::Session,
            ThemeResolverType::Fixed,
        ] {
            let resolver = select_resolver(&settings_with(kind)).build();
            assert_eq!(resolver.kind(), kind);
        }
    }
}
