//! Path-scoped, ordered interceptor registrations.

use std::fmt;
use std::sync::Arc;

use super::path::PathPattern;
use super::HandlerInterceptor;
use crate::error::InterceptError;
use crate::request::RequestContext;
use crate::view::ModelAndView;

/// Order of an interceptor registered without one.
pub const DEFAULT_ORDER: i32 = 0;

/// One interceptor with its path scope and priority.
#[derive(Clone)]
pub struct InterceptorRegistration {
    name: String,
    interceptor: Arc<dyn HandlerInterceptor>,
    include: Vec<PathPattern>,
    exclude: Vec<PathPattern>,
    order: i32,
}

impl InterceptorRegistration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interceptor(&self) -> &Arc<dyn HandlerInterceptor> {
        &self.interceptor
    }

    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(PathPattern::as_str)
    }

    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(PathPattern::as_str)
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    /// Excludes win over includes; no include pattern means every path.
    pub fn applies_to(&self, path: &str) -> bool {
        if self.exclude.iter().any(|p| p.matches(path)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| p.matches(path))
    }
}

impl fmt::Debug for InterceptorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorRegistration")
            .field("name", &self.name)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("order", &self.order)
            .finish()
    }
}

/// All interceptors known to the host, filled once at startup.
///
/// Interceptors run by ascending order; equal orders keep registration order.
#[derive(Debug, Clone, Default)]
pub struct InterceptorRegistry {
    registrations: Vec<InterceptorRegistration>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an interceptor. `order` defaults to [`DEFAULT_ORDER`].
    pub fn register(
        &mut self,
        name: impl Into<String>,
        interceptor: Arc<dyn HandlerInterceptor>,
        include: Vec<PathPattern>,
        exclude: Vec<PathPattern>,
        order: Option<i32>,
    ) -> &InterceptorRegistration {
        self.registrations.push(InterceptorRegistration {
            name: name.into(),
            interceptor,
            include,
            exclude,
            order: order.unwrap_or(DEFAULT_ORDER),
        });
        let idx = self.registrations.len() - 1;
        &self.registrations[idx]
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&InterceptorRegistration> {
        self.registrations.iter().find(|r| r.name == name)
    }

    /// Registrations in execution order.
    pub fn ordered(&self) -> Vec<&InterceptorRegistration> {
        let mut ordered: Vec<_> = self.registrations.iter().collect();
        ordered.sort_by_key(|r| r.order);
        ordered
    }

    /// Registrations that apply to `path`, in execution order.
    pub fn matching(&self, path: &str) -> Vec<&InterceptorRegistration> {
        self.ordered()
            .into_iter()
            .filter(|r| r.applies_to(path))
            .collect()
    }

    /// Runs the pre-handle hooks for the request path.
    ///
    /// Returns `Ok(false)` as soon as one interceptor stops the chain.
    pub fn pre_handle(&self, request: &mut dyn RequestContext) -> Result<bool, InterceptError> {
        let path = request.path().to_string();
        for registration in self.matching(&path) {
            if !registration.interceptor.pre_handle(request)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Runs the post-handle hooks for the request path in reverse order.
    pub fn post_handle(
        &self,
        request: &dyn RequestContext,
        mut view: Option<&mut ModelAndView>,
    ) -> Result<(), InterceptError> {
        for registration in self.matching(request.path()).into_iter().rev() {
            registration
                .interceptor
                .post_handle(request, view.as_deref_mut())?;
        }
        Ok(())
    }
}
