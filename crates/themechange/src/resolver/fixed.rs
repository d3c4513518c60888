//! A single theme for every request.

use super::{ThemeResolver, ORIGINAL_DEFAULT_THEME_NAME};
use crate::error::InterceptError;
use crate::request::RequestContext;
use crate::settings::ThemeResolverType;

/// Always resolves [`ORIGINAL_DEFAULT_THEME_NAME`]; changing it is an error.
#[derive(Debug, Clone, Default)]
pub struct FixedThemeResolver;

impl FixedThemeResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ThemeResolver for FixedThemeResolver {
    fn resolve_theme_name(&self, _request: &dyn RequestContext) -> String {
        ORIGINAL_DEFAULT_THEME_NAME.to_string()
    }

    fn set_theme_name(
        &self,
        _request: &mut dyn RequestContext,
        _theme_name: Option<&str>,
    ) -> Result<(), InterceptError> {
        Err(InterceptError::UnsupportedThemeChange {
            resolver: ThemeResolverType::Fixed.as_str(),
        })
    }

    fn kind(&self) -> ThemeResolverType {
        ThemeResolverType::Fixed
    }
}
