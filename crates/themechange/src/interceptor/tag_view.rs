//! Exposing theme tag names to views.
//!
//! After a handler returns a renderable view, the configured tag→name map is
//! written to the view under a single model attribute so templates can list
//! the available themes:
//!
//! ```jinja
//! {% for tag, name in themeChangeTagNames|items %}
//!   <a href="?theme={{ tag }}">{{ name }}</a>
//! {% endfor %}
//! ```
//!
//! With `tag-multilingual` enabled each name is used as a message key and
//! translated for the request locale, falling back to the key itself.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::trace;

use super::HandlerInterceptor;
use crate::error::InterceptError;
use crate::message::{Locale, MessageSource};
use crate::request::RequestContext;
use crate::settings::ModelAndViewSettings;
use crate::view::ModelAndView;

/// Computes the tag map a view should receive.
///
/// The result is always a fresh map in configured order; the settings are
/// never modified. Without a message source, multilingual names are returned
/// untranslated.
pub fn resolve_tag_names(
    settings: &ModelAndViewSettings,
    messages: Option<&dyn MessageSource>,
    locale: &Locale,
) -> IndexMap<String, String> {
    let multilingual = settings.tag_multilingual == Some(true);
    settings
        .tag_names
        .iter()
        .map(|(tag, name)| {
            let display = match messages {
                Some(messages) if multilingual => messages.message(name, name, locale),
                _ => name.clone(),
            };
            (tag.clone(), display)
        })
        .collect()
}

/// Adds the tag map to every renderable view.
#[derive(Clone)]
pub struct ThemeChangeViewInterceptor {
    settings: Arc<ModelAndViewSettings>,
    messages: Option<Arc<dyn MessageSource>>,
}

impl ThemeChangeViewInterceptor {
    pub fn new(settings: Arc<ModelAndViewSettings>) -> Self {
        Self {
            settings,
            messages: None,
        }
    }

    pub fn with_message_source(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Attribute name as configured, or `None` when it is blank and nothing
    /// will be added.
    fn view_attribute(&self) -> Option<&str> {
        let attribute = self.settings.view_attribute.as_str();
        (!attribute.trim().is_empty()).then_some(attribute)
    }
}

impl HandlerInterceptor for ThemeChangeViewInterceptor {
    fn post_handle(
        &self,
        request: &dyn RequestContext,
        view: Option<&mut ModelAndView>,
    ) -> Result<(), InterceptError> {
        let Some(view) = view.filter(|v| v.is_renderable()) else {
            return Ok(());
        };
        let Some(attribute) = self.view_attribute() else {
            return Ok(());
        };
        if self.settings.tag_names.is_empty() {
            return Ok(());
        }

        let locale = request.locale();
        let tags = resolve_tag_names(&self.settings, self.messages.as_deref(), &locale);
        trace!(
            attribute,
            locale = %locale,
            count = tags.len(),
            path = request.path(),
            "adding theme tags to view"
        );

        let map: Map<String, Value> = tags
            .into_iter()
            .map(|(tag, name)| (tag, Value::String(name)))
            .collect();
        view.add_object(attribute, Value::Object(map));
        Ok(())
    }
}
