//! Server-rendered views and their model attributes.
//!
//! A [`ModelAndView`] is what a handler hands back to the host for rendering:
//! a target (a template name or a redirect) plus model attributes in insertion
//! order. Interceptors run after the handler and may add attributes before the
//! view is rendered.

use indexmap::IndexMap;
use minijinja::Environment;
use serde_json::Value;

use crate::error::ViewError;

/// Prefix marking a view name as a redirect.
pub const REDIRECT_URL_PREFIX: &str = "redirect:";

/// What a [`ModelAndView`] renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    /// A template rendered with the model as context.
    Template(String),
    /// A redirect; model attributes are never rendered.
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelAndView {
    target: ViewTarget,
    model: IndexMap<String, Value>,
}

impl ModelAndView {
    /// Creates a view from a name; `redirect:` names become redirects.
    pub fn new(view_name: impl Into<String>) -> Self {
        let view_name = view_name.into();
        let target = match view_name.strip_prefix(REDIRECT_URL_PREFIX) {
            Some(url) => ViewTarget::Redirect(url.to_string()),
            None => ViewTarget::Template(view_name),
        };
        Self {
            target,
            model: IndexMap::new(),
        }
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            target: ViewTarget::Redirect(url.into()),
            model: IndexMap::new(),
        }
    }

    pub fn target(&self) -> &ViewTarget {
        &self.target
    }

    /// True for template views: the only ones whose model reaches the output.
    pub fn is_renderable(&self) -> bool {
        matches!(self.target, ViewTarget::Template(_))
    }

    /// Sets a model attribute, replacing any previous value under `name`.
    pub fn add_object(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.model.insert(name.into(), value.into());
    }

    pub fn with_object(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_object(name, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.model.get(name)
    }

    pub fn model(&self) -> &IndexMap<String, Value> {
        &self.model
    }

    /// Renders the template named by this view with the model as context.
    pub fn render(&self, env: &Environment<'_>) -> Result<String, ViewError> {
        match &self.target {
            ViewTarget::Template(name) => {
                let template = env.get_template(name)?;
                Ok(template.render(&self.model)?)
            }
            ViewTarget::Redirect(url) => Err(ViewError::NotRenderable(url.clone())),
        }
    }
}
