//! Switching themes through a request parameter.
//!
//! ```html
//! <a href="?theme=dark">Dark</a>
//! ```

use std::sync::Arc;

use tracing::trace;

use super::HandlerInterceptor;
use crate::error::InterceptError;
use crate::request::RequestContext;
use crate::resolver::ThemeResolver;
use crate::settings::DEFAULT_PARAM_NAME;

/// Passes the value of the theme parameter to the active resolver.
#[derive(Debug, Clone)]
pub struct ThemeChangeInterceptor {
    param_name: String,
    resolver: Arc<dyn ThemeResolver>,
}

impl ThemeChangeInterceptor {
    pub fn new(resolver: Arc<dyn ThemeResolver>) -> Self {
        Self {
            param_name: DEFAULT_PARAM_NAME.to_string(),
            resolver,
        }
    }

    /// Uses another parameter name; blank names keep the current one.
    pub fn with_param_name(mut self, param_name: &str) -> Self {
        let param_name = param_name.trim();
        if !param_name.is_empty() {
            self.param_name = param_name.to_string();
        }
        self
    }

    pub fn param_name(&self) -> &str {
        &self.param_name
    }
}

impl HandlerInterceptor for ThemeChangeInterceptor {
    fn pre_handle(&self, request: &mut dyn RequestContext) -> Result<bool, InterceptError> {
        if let Some(theme) = request.parameter(&self.param_name).map(str::to_string) {
            trace!(
                theme = %theme,
                resolver = self.resolver.kind().as_str(),
                path = request.path(),
                "changing theme"
            );
            self.resolver.set_theme_name(request, Some(&theme))?;
        }
        Ok(true)
    }
}
