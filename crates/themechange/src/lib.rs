//! # themechange - Per-Request Themes for Server-Rendered Apps
//!
//! `themechange` decides which visual theme a request is rendered with, lets
//! users switch theme through a query parameter, and exposes the configured
//! theme tags to every rendered view.
//!
//! ## Core Concepts
//!
//! - [`Settings`]: The `theme-change` configuration namespace, loaded from YAML or JSON
//! - [`ThemeResolver`]: How the active theme is stored (cookie, session or fixed)
//! - [`ThemeChangeInterceptor`]: Switches theme when `?theme=<name>` is present
//! - [`ThemeChangeViewInterceptor`]: Adds the tag→display-name map to views
//! - [`InterceptorRegistry`]: Ordered, path-scoped interceptors run by the host
//! - [`ThemeChange`]: Builds all of the above from settings and installs it
//!
//! ## Quick Start
//!
//! ```rust
//! use minijinja::Environment;
//! use themechange::{Exchange, InterceptorRegistry, ModelAndView, Settings, ThemeChange};
//!
//! let settings = Settings::from_yaml(r#"
//! theme-change:
//!   model-and-view:
//!     tag-names:
//!       dark: Dark
//!       light: Light
//! "#).unwrap();
//!
//! let theme_change = ThemeChange::builder(settings).build();
//! let mut registry = InterceptorRegistry::new();
//! theme_change.install(&mut registry).unwrap();
//!
//! // `?theme=dark` stores the choice in a cookie.
//! let mut request = Exchange::new("/").with_parameter("theme", "dark");
//! assert!(registry.pre_handle(&mut request).unwrap());
//!
//! // The handler returns a view; interceptors decorate it.
//! let mut view = ModelAndView::new("index");
//! registry.post_handle(&request, Some(&mut view)).unwrap();
//!
//! let mut env = Environment::new();
//! env.add_template("index", "{% for tag, name in themeChangeTagNames|items %}{{ tag }}={{ name }};{% endfor %}").unwrap();
//! assert_eq!(view.render(&env).unwrap(), "dark=Dark;light=Light;");
//!
//! // The cookie carries the theme into the next request.
//! let next = request.next_request("/");
//! assert_eq!(theme_change.resolve_theme_name(&next), "dark");
//! ```
//!
//! ## Host Integration
//!
//! The crate owns no HTTP stack. Hosts adapt their request type to
//! [`RequestContext`], call [`InterceptorRegistry::pre_handle`] before and
//! [`InterceptorRegistry::post_handle`] after their handler, and translate
//! [`ThemeCookie`]s into `Set-Cookie` headers. [`Exchange`] is an in-memory
//! implementation useful for tests and simple hosts.
//!
//! ## Logging
//!
//! Decisions are reported through [`tracing`]: strategy selection and
//! registration at `debug`, theme switches and tag injection at `trace`,
//! rejected cookie values at `warn`. No subscriber is installed.

pub mod error;
pub mod interceptor;
pub mod message;
pub mod registrar;
pub mod request;
pub mod resolver;
pub mod settings;
pub mod setup;
pub mod source;
pub mod view;

// Error types
pub use error::{ConfigError, InterceptError, ViewError};

// Settings exports
pub use settings::{
    CookieThemeResolverSettings, InterceptorPaths, ModelAndViewSettings,
    SessionThemeResolverSettings, Settings, ThemeInterceptorSettings, ThemeResolverType,
    ThemeSourceSettings, PROPERTIES_PREFIX,
};

// Resolver exports
pub use resolver::{
    select_resolver, CookieResolverConfig, CookieThemeResolver, FixedThemeResolver,
    ResolverSelection, SessionResolverConfig, SessionThemeResolver, ThemeResolver,
    ORIGINAL_DEFAULT_THEME_NAME,
};

// Interceptor exports
pub use interceptor::{
    resolve_tag_names, HandlerInterceptor, InterceptorRegistration, InterceptorRegistry,
    PathPattern, ThemeChangeInterceptor, ThemeChangeViewInterceptor,
};

pub use message::{Locale, MessageSource, StaticMessageSource};
pub use registrar::register_interceptor;
pub use request::{Exchange, RequestContext, ThemeCookie};
pub use setup::{ThemeChange, ThemeChangeBuilder, THEME_INTERCEPTOR, VIEW_INTERCEPTOR};
pub use source::ThemeSourceDescriptor;
pub use view::{ModelAndView, ViewTarget};
