//! Interceptors around request handling.
//!
//! Interceptors run at two points of the host's request pipeline:
//!
//! ```text
//! request
//!   → PRE-HANDLE  ← (theme switch via query parameter)
//!   → handler     → ModelAndView
//!   → POST-HANDLE ← (tag names added to the view)
//!   → view rendering
//! ```
//!
//! Each interceptor implements the hook it needs; the other defaults to a
//! no-op. Interceptors are registered once at startup in an
//! [`InterceptorRegistry`] that scopes them to Ant-style path patterns and
//! orders them.

mod path;
mod registry;
pub mod tag_view;
pub mod theme_change;

use crate::error::InterceptError;
use crate::request::RequestContext;
use crate::view::ModelAndView;

pub use path::PathPattern;
pub use registry::{InterceptorRegistration, InterceptorRegistry};
pub use tag_view::{resolve_tag_names, ThemeChangeViewInterceptor};
pub use theme_change::ThemeChangeInterceptor;

/// A hook invoked by the host around request handling.
///
/// Implementations are shared across concurrent requests.
pub trait HandlerInterceptor: Send + Sync {
    /// Runs before the handler. Returning `Ok(false)` stops the chain; the host
    /// is then expected to have produced a response itself.
    fn pre_handle(&self, _request: &mut dyn RequestContext) -> Result<bool, InterceptError> {
        Ok(true)
    }

    /// Runs after the handler, before the view is rendered. `view` is `None`
    /// when the handler produced no view.
    fn post_handle(
        &self,
        _request: &dyn RequestContext,
        _view: Option<&mut ModelAndView>,
    ) -> Result<(), InterceptError> {
        Ok(())
    }
}
