//! Cookie-backed theme resolution.

use tracing::{trace, warn};

use super::{
    CookieResolverConfig, ThemeResolver, ORIGINAL_DEFAULT_THEME_NAME,
    THEME_REQUEST_ATTRIBUTE_NAME,
};
use crate::error::InterceptError;
use crate::request::{RequestContext, ThemeCookie};
use crate::settings::{non_blank, ThemeResolverType};

/// Stores the theme name in a cookie.
///
/// A theme chosen earlier in the same request is cached as a request attribute
/// and wins over the incoming cookie.
#[derive(Debug, Clone)]
pub struct CookieThemeResolver {
    config: CookieResolverConfig,
}

impl CookieThemeResolver {
    pub fn new(config: CookieResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CookieResolverConfig {
        &self.config
    }

    pub fn default_theme_name(&self) -> &str {
        self.config
            .default_theme_name
            .as_deref()
            .unwrap_or(ORIGINAL_DEFAULT_THEME_NAME)
    }

    fn cookie(&self, value: &str, max_age: Option<i32>) -> ThemeCookie {
        ThemeCookie {
            name: self.config.cookie_name.clone(),
            value: value.to_string(),
            path: self.config.cookie_path.clone(),
            domain: self.config.cookie_domain.clone(),
            max_age,
            http_only: self.config.http_only,
            secure: self.config.secure,
        }
    }

    fn cookie_theme(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        if is_valid_theme_name(value) {
            return Some(value.to_string());
        }
        if self.config.reject_invalid_cookies {
            warn!(
                cookie = %self.config.cookie_name,
                value = raw,
                "ignoring invalid theme cookie"
            );
            return None;
        }
        non_blank(Some(value)).map(str::to_string)
    }
}

/// The charset a theme cookie may carry, on both the read and write paths.
fn is_valid_theme_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl ThemeResolver for CookieThemeResolver {
    fn resolve_theme_name(&self, request: &dyn RequestContext) -> String {
        if let Some(cached) = request.attribute(THEME_REQUEST_ATTRIBUTE_NAME) {
            return cached.to_string();
        }
        request
            .cookie(&self.config.cookie_name)
            .and_then(|raw| self.cookie_theme(raw))
            .unwrap_or_else(|| self.default_theme_name().to_string())
    }

    fn set_theme_name(
        &self,
        request: &mut dyn RequestContext,
        theme_name: Option<&str>,
    ) -> Result<(), InterceptError> {
        match non_blank(theme_name) {
            Some(name) => {
                if !is_valid_theme_name(name) {
                    warn!(
                        cookie = %self.config.cookie_name,
                        theme = ?name,
                        "refusing to store invalid theme name"
                    );
                    return Err(InterceptError::InvalidThemeName {
                        name: name.to_string(),
                    });
                }
                trace!(theme = name, cookie = %self.config.cookie_name, "storing theme cookie");
                request.add_cookie(self.cookie(name, self.config.cookie_max_age));
                request.set_attribute(THEME_REQUEST_ATTRIBUTE_NAME, Some(name.to_string()));
            }
            None => {
                trace!(cookie = %self.config.cookie_name, "removing theme cookie");
                request.add_cookie(self.cookie("", Some(0)));
                request.set_attribute(
                    THEME_REQUEST_ATTRIBUTE_NAME,
                    Some(self.default_theme_name().to_string()),
                );
            }
        }
        Ok(())
    }

    fn kind(&self) -> ThemeResolverType {
        ThemeResolverType::Cookie
    }
}
