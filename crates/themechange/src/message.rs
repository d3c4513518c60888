//! Locale-aware message lookup.
//!
//! Tag names can be message keys instead of display text. The view interceptor
//! translates them through a [`MessageSource`] using the request's [`Locale`].
//! Hosts typically adapt their own i18n layer to the trait;
//! [`StaticMessageSource`] is an in-memory implementation.

use std::collections::HashMap;
use std::fmt;

/// A BCP 47 language tag such as `de` or `en-US`.
///
/// Underscores are accepted as separators and normalized to hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().replace('_', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, e.g. `en` for `en-US`.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Tags to try, most specific first: `de-CH-1996`, `de-CH`, `de`.
    pub fn fallback_chain(&self) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut tag = self.0.as_str();
        while !tag.is_empty() {
            chain.push(tag);
            match tag.rfind('-') {
                Some(idx) => tag = &tag[..idx],
                None => break,
            }
        }
        chain
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Resolves message keys for a locale.
///
/// Implementations never fail: when no message exists for `key`, `default` is
/// returned.
pub trait MessageSource: Send + Sync {
    fn message(&self, key: &str, default: &str, locale: &Locale) -> String;
}

/// In-memory message bundles keyed by language tag.
///
/// Lookup walks the locale's fallback chain, then the locale-independent
/// bundle, then returns the caller's default.
///
/// ```rust
/// use themechange::{Locale, MessageSource, StaticMessageSource};
///
/// let messages = StaticMessageSource::new()
///     .with_message("de", "theme.dark.label", "Dunkles Thema")
///     .with_default_message("theme.dark.label", "Dark");
///
/// assert_eq!(messages.message("theme.dark.label", "?", &Locale::new("de-AT")), "Dunkles Thema");
/// assert_eq!(messages.message("theme.dark.label", "?", &Locale::new("fr")), "Dark");
/// assert_eq!(messages.message("missing", "fallback", &Locale::new("de")), "fallback");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMessageSource {
    bundles: HashMap<String, HashMap<String, String>>,
    defaults: HashMap<String, String>,
}

impl StaticMessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message for one locale.
    pub fn with_message(
        mut self,
        locale: impl Into<Locale>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let locale = locale.into();
        self.bundles
            .entry(locale.as_str().to_string())
            .or_default()
            .insert(key.into(), message.into());
        self
    }

    /// Adds a message used when no locale-specific message exists.
    pub fn with_default_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), message.into());
        self
    }

    fn lookup(&self, key: &str, locale: &Locale) -> Option<&str> {
        locale
            .fallback_chain()
            .into_iter()
            .find_map(|tag| self.bundles.get(tag).and_then(|bundle| bundle.get(key)))
            .or_else(|| self.defaults.get(key))
            .map(String::as_str)
    }
}

impl MessageSource for StaticMessageSource {
    fn message(&self, key: &str, default: &str, locale: &Locale) -> String {
        self.lookup(key, locale).unwrap_or(default).to_string()
    }
}
