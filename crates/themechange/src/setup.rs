//! Wiring everything together at startup.
//!
//! [`ThemeChange`] is built once from [`Settings`] and owns the pieces every
//! request handler shares: the active [`ThemeResolver`], the theme source
//! descriptor and the two interceptors.
//!
//! ```rust
//! use themechange::{InterceptorRegistry, Settings, ThemeChange};
//!
//! let settings = Settings::from_yaml(r#"
//! theme-change:
//!   model-and-view:
//!     tag-names:
//!       dark: Dark Theme
//! "#).unwrap();
//!
//! let theme_change = ThemeChange::builder(settings).build();
//! let mut registry = InterceptorRegistry::new();
//! theme_change.install(&mut registry).unwrap();
//!
//! assert_eq!(registry.len(), 2);
//! ```
//!
//! A host that brings its own resolver passes it to
//! [`ThemeChangeBuilder::theme_resolver`]; the configured strategy is then not
//! built at all.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::interceptor::{
    InterceptorRegistry, ThemeChangeInterceptor, ThemeChangeViewInterceptor,
};
use crate::message::MessageSource;
use crate::registrar::register_interceptor;
use crate::request::RequestContext;
use crate::resolver::{select_resolver, ResolverSelection, ThemeResolver};
use crate::settings::{ModelAndViewSettings, Settings};
use crate::source::ThemeSourceDescriptor;

/// Registry name of the theme switch interceptor.
pub const THEME_INTERCEPTOR: &str = "themeChangeInterceptor";

/// Registry name of the view interceptor.
pub const VIEW_INTERCEPTOR: &str = "themeChangeViewInterceptor";

/// Builder for [`ThemeChange`].
pub struct ThemeChangeBuilder {
    settings: Settings,
    theme_resolver: Option<Arc<dyn ThemeResolver>>,
    message_source: Option<Arc<dyn MessageSource>>,
}

impl ThemeChangeBuilder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            theme_resolver: None,
            message_source: None,
        }
    }

    /// Uses a host-provided resolver instead of the configured strategy.
    pub fn theme_resolver(mut self, resolver: Arc<dyn ThemeResolver>) -> Self {
        self.theme_resolver = Some(resolver);
        self
    }

    /// Message source used to translate multilingual tag names.
    pub fn message_source(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.message_source = Some(messages);
        self
    }

    pub fn build(self) -> ThemeChange {
        let (selection, theme_resolver) = match self.theme_resolver {
            Some(resolver) => {
                debug!(resolver = resolver.kind().as_str(), "using provided theme resolver");
                (None, resolver)
            }
            None => {
                let selection = select_resolver(&self.settings);
                debug!(resolver = selection.kind().as_str(), "selected theme resolver");
                let resolver = selection.build();
                (Some(selection), resolver)
            }
        };

        ThemeChange {
            theme_source: ThemeSourceDescriptor::from_settings(&self.settings.theme_source),
            view_settings: Arc::new(self.settings.model_and_view.clone()),
            settings: Arc::new(self.settings),
            selection,
            theme_resolver,
            message_source: self.message_source,
        }
    }
}

/// Theme change components, built once per process.
pub struct ThemeChange {
    settings: Arc<Settings>,
    view_settings: Arc<ModelAndViewSettings>,
    selection: Option<ResolverSelection>,
    theme_resolver: Arc<dyn ThemeResolver>,
    theme_source: ThemeSourceDescriptor,
    message_source: Option<Arc<dyn MessageSource>>,
}

impl ThemeChange {
    pub fn builder(settings: Settings) -> ThemeChangeBuilder {
        ThemeChangeBuilder::new(settings)
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// The configured strategy, or `None` when a resolver was provided.
    pub fn selection(&self) -> Option<&ResolverSelection> {
        self.selection.as_ref()
    }

    pub fn theme_resolver(&self) -> &Arc<dyn ThemeResolver> {
        &self.theme_resolver
    }

    pub fn theme_source(&self) -> &ThemeSourceDescriptor {
        &self.theme_source
    }

    /// Theme name for a request, through the active resolver.
    pub fn resolve_theme_name(&self, request: &dyn RequestContext) -> String {
        self.theme_resolver.resolve_theme_name(request)
    }

    pub fn theme_change_interceptor(&self) -> ThemeChangeInterceptor {
        ThemeChangeInterceptor::new(self.theme_resolver.clone())
            .with_param_name(&self.settings.theme_interceptor.param_name)
    }

    pub fn view_interceptor(&self) -> ThemeChangeViewInterceptor {
        let interceptor = ThemeChangeViewInterceptor::new(self.view_settings.clone());
        match &self.message_source {
            Some(messages) => interceptor.with_message_source(messages.clone()),
            None => interceptor,
        }
    }

    /// Registers both interceptors. Does nothing when disabled.
    ///
    /// The theme switch interceptor is registered first; a failure there
    /// leaves the view interceptor unregistered as well.
    pub fn install(&self, registry: &mut InterceptorRegistry) -> Result<()> {
        if !self.is_enabled() {
            debug!("theme change disabled, no interceptors registered");
            return Ok(());
        }

        register_interceptor(
            registry,
            THEME_INTERCEPTOR,
            Arc::new(self.theme_change_interceptor()),
            &self.settings.theme_interceptor.paths,
        )?;
        register_interceptor(
            registry,
            VIEW_INTERCEPTOR,
            Arc::new(self.view_interceptor()),
            &self.settings.model_and_view.paths,
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for ThemeChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeChange")
            .field("enabled", &self.settings.enabled)
            .field("selection", &self.selection)
            .field("theme_resolver", &self.theme_resolver)
            .field("theme_source", &self.theme_source)
            .field("has_message_source", &self.message_source.is_some())
            .finish()
    }
}
