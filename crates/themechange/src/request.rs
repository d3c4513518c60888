//! The request seen by interceptors and theme resolvers.
//!
//! [`RequestContext`] is the host framework's side of a request/response pair.
//! Cookie header parsing, `Set-Cookie` emission and session storage stay with
//! the host; resolvers only read and write named values through this trait.
//!
//! [`Exchange`] is an in-memory implementation, useful in tests and for hosts
//! that build their request state up front.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::message::Locale;

/// A cookie the theme resolver asks the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub domain: Option<String>,
    /// Seconds; `Some(0)` expires the cookie, `None` makes it a session cookie.
    pub max_age: Option<i32>,
    pub http_only: bool,
    pub secure: bool,
}

impl ThemeCookie {
    /// Whether this cookie removes the stored theme.
    pub fn is_removal(&self) -> bool {
        self.max_age == Some(0)
    }

    /// Formats the cookie as a `Set-Cookie` header value.
    ///
    /// The value is percent-encoded outside `[A-Za-z0-9._~-]`. Separators,
    /// whitespace and control characters are dropped from the name, path and
    /// domain. Negative max ages are omitted, leaving a browser-session cookie.
    pub fn to_header_value(&self) -> String {
        let mut header = format!(
            "{}={}; Path={}",
            header_token(&self.name),
            urlencoding::encode(&self.value),
            header_token(&self.path)
        );
        if let Some(domain) = &self.domain {
            header.push_str("; Domain=");
            header.push_str(&header_token(domain));
        }
        if let Some(max_age) = self.max_age.filter(|age| *age >= 0) {
            header.push_str(&format!("; Max-Age={}", max_age));
        }
        if self.secure {
            header.push_str("; Secure");
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        header
    }
}

/// Strips characters that would end or split a `Set-Cookie` attribute.
fn header_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() && !c.is_whitespace() && !matches!(c, ';' | ','))
        .collect()
}

/// Request state available to interceptors and resolvers.
pub trait RequestContext {
    /// Request path without query string, e.g. `/account/settings`.
    fn path(&self) -> &str;

    /// Value of a query or form parameter.
    fn parameter(&self, name: &str) -> Option<&str>;

    /// Locale the response is rendered for.
    fn locale(&self) -> Locale;

    /// Value of an incoming cookie.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Queues a cookie on the response.
    fn add_cookie(&mut self, cookie: ThemeCookie);

    fn session_attribute(&self, name: &str) -> Option<&str>;

    /// Stores a session attribute, or removes it when `value` is `None`.
    fn set_session_attribute(&mut self, name: &str, value: Option<String>);

    /// Request-scoped attribute, visible until the response is produced.
    fn attribute(&self, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, name: &str, value: Option<String>);
}

/// An in-memory request/response pair.
///
/// ```rust
/// use themechange::{Exchange, RequestContext};
///
/// let exchange = Exchange::new("/home")
///     .with_parameter("theme", "dark")
///     .with_locale("de");
///
/// assert_eq!(exchange.parameter("theme"), Some("dark"));
/// assert_eq!(exchange.locale().as_str(), "de");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    path: String,
    parameters: IndexMap<String, String>,
    locale: Locale,
    cookies: HashMap<String, String>,
    response_cookies: Vec<ThemeCookie>,
    session: HashMap<String, String>,
    attributes: HashMap<String, String>,
}

impl Exchange {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Adds an incoming cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_session_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.session.insert(name.into(), value.into());
        self
    }

    /// Cookies queued on the response, in the order they were added.
    pub fn response_cookies(&self) -> &[ThemeCookie] {
        &self.response_cookies
    }

    /// Drops request-scoped state and carries the response cookies and session
    /// over into a follow-up request for `path`, as a browser would.
    pub fn next_request(&self, path: impl Into<String>) -> Exchange {
        let mut cookies = self.cookies.clone();
        for cookie in &self.response_cookies {
            if cookie.is_removal() {
                cookies.remove(&cookie.name);
            } else {
                cookies.insert(cookie.name.clone(), cookie.value.clone());
            }
        }
        Exchange {
            path: path.into(),
            locale: self.locale.clone(),
            cookies,
            session: self.session.clone(),
            ..Default::default()
        }
    }
}

impl RequestContext for Exchange {
    fn path(&self) -> &str {
        &self.path
    }

    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    fn locale(&self) -> Locale {
        self.locale.clone()
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    fn add_cookie(&mut self, cookie: ThemeCookie) {
        self.response_cookies.push(cookie);
    }

    fn session_attribute(&self, name: &str) -> Option<&str> {
        self.session.get(name).map(String::as_str)
    }

    fn set_session_attribute(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.session.insert(name.to_string(), value);
            }
            None => {
                self.session.remove(name);
            }
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.attributes.insert(name.to_string(), value);
            }
            None => {
                self.attributes.remove(name);
            }
        }
    }
}
