//! Session-backed theme resolution.

use tracing::trace;

use super::{
    SessionResolverConfig, ThemeResolver, ORIGINAL_DEFAULT_THEME_NAME,
    THEME_SESSION_ATTRIBUTE_NAME,
};
use crate::error::InterceptError;
use crate::request::RequestContext;
use crate::settings::ThemeResolverType;

/// Stores the theme name as a session attribute.
#[derive(Debug, Clone, Default)]
pub struct SessionThemeResolver {
    config: SessionResolverConfig,
}

impl SessionThemeResolver {
    pub fn new(config: SessionResolverConfig) -> Self {
        Self { config }
    }

    pub fn default_theme_name(&self) -> &str {
        self.config
            .default_theme_name
            .as_deref()
            .unwrap_or(ORIGINAL_DEFAULT_THEME_NAME)
    }
}

impl ThemeResolver for SessionThemeResolver {
    fn resolve_theme_name(&self, request: &dyn RequestContext) -> String {
        request
            .session_attribute(THEME_SESSION_ATTRIBUTE_NAME)
            .unwrap_or(self.default_theme_name())
            .to_string()
    }

    fn set_theme_name(
        &self,
        request: &mut dyn RequestContext,
        theme_name: Option<&str>,
    ) -> Result<(), InterceptError> {
        let name = theme_name
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);
        trace!(theme = ?name, "storing session theme");
        request.set_session_attribute(THEME_SESSION_ATTRIBUTE_NAME, name);
        Ok(())
    }

    fn kind(&self) -> ThemeResolverType {
        ThemeResolverType::Session
    }
}
