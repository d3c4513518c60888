//! End-to-end request flows through the installed interceptors.

use std::io::Write;
use std::sync::Arc;

use minijinja::Environment;
use serde_json::json;
use themechange::{
    ConfigError, Exchange, InterceptError, InterceptorRegistry, ModelAndView, RequestContext,
    Settings, StaticMessageSource, ThemeChange, ThemeResolverType, THEME_INTERCEPTOR,
    VIEW_INTERCEPTOR,
};

// ============================================================================
// Helpers
// ============================================================================

const TAGS_TEMPLATE: &str =
    "{% for tag, name in themeChangeTagNames|items %}[{{ tag }}:{{ name }}]{% endfor %}";

fn install(settings: Settings) -> (ThemeChange, InterceptorRegistry) {
    let theme_change = ThemeChange::builder(settings).build();
    let mut registry = InterceptorRegistry::new();
    theme_change.install(&mut registry).unwrap();
    (theme_change, registry)
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_template("tags", TAGS_TEMPLATE).unwrap();
    env
}

/// Runs both hooks around a handler returning the `tags` view.
fn handle(registry: &InterceptorRegistry, request: &mut Exchange) -> ModelAndView {
    assert!(registry.pre_handle(request).unwrap());
    let mut view = ModelAndView::new("tags");
    registry.post_handle(&*request, Some(&mut view)).unwrap();
    view
}

// ============================================================================
// Cookie strategy
// ============================================================================

#[test]
fn cookie_switch_persists_across_requests() {
    let settings = Settings::from_yaml(
        r#"
theme-change:
  cookie-theme-resolver:
    cookie-name: SKIN
    cookie-max-age: 3600
  model-and-view:
    tag-names:
      dark: Dark
      light: Light
"#,
    )
    .unwrap();
    let (theme_change, registry) = install(settings);

    let mut first = Exchange::new("/account").with_parameter("theme", "dark");
    let view = handle(&registry, &mut first);

    assert_eq!(theme_change.resolve_theme_name(&first), "dark");
    let cookies = first.response_cookies();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].to_header_value(), "SKIN=dark; Path=/; Max-Age=3600");
    assert_eq!(
        view.render(&environment()).unwrap(),
        "[dark:Dark][light:Light]"
    );

    let mut second = first.next_request("/account");
    handle(&registry, &mut second);
    assert_eq!(theme_change.resolve_theme_name(&second), "dark");
    assert!(second.response_cookies().is_empty());
}

#[test]
fn blank_theme_parameter_resets_to_default() {
    let mut settings = Settings::default();
    settings.cookie_theme_resolver.default_theme_name = Some("light".into());
    let (theme_change, registry) = install(settings);

    let mut request = Exchange::new("/")
        .with_cookie("THEME_RESOLVER_THEME", "dark")
        .with_parameter("theme", "");
    handle(&registry, &mut request);

    assert_eq!(theme_change.resolve_theme_name(&request), "light");
    assert!(request.response_cookies()[0].is_removal());
    let next = request.next_request("/");
    assert_eq!(next.cookie("THEME_RESOLVER_THEME"), None);
    assert_eq!(theme_change.resolve_theme_name(&next), "light");
}

#[test]
fn tampered_cookie_falls_back_to_default() {
    let (theme_change, _) = install(Settings::default());
    let request = Exchange::new("/").with_cookie("THEME_RESOLVER_THEME", "<script>");

    assert_eq!(theme_change.resolve_theme_name(&request), "theme");
}

#[test]
fn injected_theme_parameter_writes_no_cookie() {
    let (theme_change, registry) = install(Settings::default());

    let mut request = Exchange::new("/")
        .with_parameter("theme", "dark; Domain=evil.example\r\nX-Injected: 1");
    let err = registry.pre_handle(&mut request).unwrap_err();

    assert!(matches!(err, InterceptError::InvalidThemeName { .. }));
    assert!(request.response_cookies().is_empty());
    assert_eq!(theme_change.resolve_theme_name(&request), "theme");
}

#[test]
fn switched_theme_survives_next_request_only_when_valid() {
    let (theme_change, registry) = install(Settings::default());

    let mut valid = Exchange::new("/").with_parameter("theme", "high-contrast");
    handle(&registry, &mut valid);
    assert_eq!(theme_change.resolve_theme_name(&valid), "high-contrast");
    let next = valid.next_request("/");
    assert_eq!(theme_change.resolve_theme_name(&next), "high-contrast");

    let mut invalid = Exchange::new("/")
        .with_cookie("THEME_RESOLVER_THEME", "dark")
        .with_parameter("theme", "high contrast");
    assert!(registry.pre_handle(&mut invalid).is_err());
    // The previous choice stays in effect on both requests.
    assert_eq!(theme_change.resolve_theme_name(&invalid), "dark");
    let next = invalid.next_request("/");
    assert_eq!(theme_change.resolve_theme_name(&next), "dark");
}

#[test]
fn excluded_paths_skip_theme_switch() {
    let settings = Settings::from_yaml(
        r#"
theme-change:
  theme-interceptor:
    exclude-paths: ["/static/**"]
  model-and-view:
    intercept-paths: ["/pages/**"]
    tag-names:
      dark: Dark
"#,
    )
    .unwrap();
    let (_, registry) = install(settings);

    let mut asset = Exchange::new("/static/site.css").with_parameter("theme", "dark");
    let view = handle(&registry, &mut asset);
    assert!(asset.response_cookies().is_empty());
    assert!(view.model().is_empty());

    let mut page = Exchange::new("/pages/home").with_parameter("theme", "dark");
    let view = handle(&registry, &mut page);
    assert_eq!(page.response_cookies().len(), 1);
    assert_eq!(view.attribute("themeChangeTagNames"), Some(&json!({"dark": "Dark"})));
}

// ============================================================================
// Session and fixed strategies
// ============================================================================

#[test]
fn session_switch_persists_without_cookies() {
    let mut settings = Settings {
        theme_resolver_type: ThemeResolverType::Session,
        ..Default::default()
    };
    settings.theme_interceptor.param_name = "skin".into();
    let (theme_change, registry) = install(settings);

    let mut first = Exchange::new("/").with_parameter("skin", "dark");
    handle(&registry, &mut first);
    assert!(first.response_cookies().is_empty());

    let second = first.next_request("/other");
    assert_eq!(theme_change.resolve_theme_name(&second), "dark");
}

#[test]
fn fixed_strategy_rejects_switch_requests() {
    let settings = Settings {
        theme_resolver_type: ThemeResolverType::Fixed,
        ..Default::default()
    };
    let (theme_change, registry) = install(settings);

    let mut request = Exchange::new("/").with_parameter("theme", "dark");
    let err = registry.pre_handle(&mut request).unwrap_err();
    assert!(matches!(
        err,
        InterceptError::UnsupportedThemeChange { resolver: "fixed" }
    ));

    let plain = Exchange::new("/");
    assert_eq!(theme_change.resolve_theme_name(&plain), "theme");
}

// ============================================================================
// Multilingual tag names
// ============================================================================

#[test]
fn multilingual_tags_follow_request_locale() {
    let settings = Settings::from_yaml(
        r#"
theme-change:
  model-and-view:
    tag-multilingual: true
    tag-names:
      dark: theme.dark
      light: theme.light
"#,
    )
    .unwrap();
    let messages = StaticMessageSource::new()
        .with_message("de", "theme.dark", "Dunkel")
        .with_message("de", "theme.light", "Hell")
        .with_default_message("theme.dark", "Dark");
    let theme_change = ThemeChange::builder(settings)
        .message_source(Arc::new(messages))
        .build();
    let mut registry = InterceptorRegistry::new();
    theme_change.install(&mut registry).unwrap();
    let env = environment();

    let mut german = Exchange::new("/").with_locale("de_DE");
    assert_eq!(
        handle(&registry, &mut german).render(&env).unwrap(),
        "[dark:Dunkel][light:Hell]"
    );

    let mut french = Exchange::new("/").with_locale("fr");
    assert_eq!(
        handle(&registry, &mut french).render(&env).unwrap(),
        "[dark:Dark][light:theme.light]"
    );
}

#[test]
fn redirect_views_receive_no_tags() {
    let settings = Settings::from_yaml(
        r#"
theme-change:
  model-and-view:
    tag-names:
      dark: Dark
"#,
    )
    .unwrap();
    let (_, registry) = install(settings);

    let request = Exchange::new("/");
    let mut view = ModelAndView::new("redirect:/login");
    registry.post_handle(&request, Some(&mut view)).unwrap();

    assert!(view.model().is_empty());
    assert!(view.render(&environment()).is_err());
}

// ============================================================================
// Installation
// ============================================================================

#[test]
fn disabled_installs_nothing_and_requests_pass_through() {
    let settings = Settings::from_yaml("theme-change:\n  enabled: false\n").unwrap();
    let (_, registry) = install(settings);
    assert!(registry.is_empty());

    let mut request = Exchange::new("/").with_parameter("theme", "dark");
    assert!(registry.pre_handle(&mut request).unwrap());
    assert!(request.response_cookies().is_empty());
}

#[test]
fn installation_order_follows_interceptor_order() {
    let settings = Settings::from_yaml(
        r#"
theme-change:
  theme-interceptor:
    interceptor-order: 5
  model-and-view:
    interceptor-order: -5
"#,
    )
    .unwrap();
    let (_, registry) = install(settings);

    let names: Vec<&str> = registry.ordered().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec![VIEW_INTERCEPTOR, THEME_INTERCEPTOR]);
}

#[test]
fn empty_intercept_paths_fail_installation() {
    let settings = Settings::from_yaml(
        r#"
theme-change:
  theme-interceptor:
    intercept-paths: []
"#,
    )
    .unwrap();
    let theme_change = ThemeChange::builder(settings).build();
    let mut registry = InterceptorRegistry::new();

    let err = theme_change.install(&mut registry).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyInterceptPaths { .. }));
    assert!(registry.is_empty());
}

#[test]
fn settings_file_drives_installation() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"theme-change": {{"theme-resolver-type": "session", "model-and-view": {{"tag-names": {{"dark": "Dark"}}}}}}}}"#
    )
    .unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    let (theme_change, registry) = install(settings);

    assert_eq!(
        theme_change.theme_resolver().kind(),
        ThemeResolverType::Session
    );
    assert_eq!(registry.len(), 2);
}
