//! Ant-style path patterns.
//!
//! - `?` matches one character other than `/`
//! - `*` matches any run of characters within one path segment
//! - `**` matches any number of whole segments, including none
//!
//! A trailing `/**` also matches the bare prefix, so `/static/**` matches
//! `/static` as well as `/static/css/site.css`.

use std::fmt;

use regex::Regex;

use crate::error::ConfigError;

#[derive(Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compiles a pattern. Blank patterns are rejected.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidPathPattern {
            pattern: pattern.to_string(),
            reason,
        };
        if pattern.trim().is_empty() {
            return Err(invalid("pattern is blank".to_string()));
        }
        let regex = Regex::new(&translate(pattern)).map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathPattern").field(&self.source).finish()
    }
}

fn translate(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("/**") {
            if after.is_empty() || after.starts_with('/') {
                out.push_str("(?:/.*)?");
                rest = after;
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix("**") {
            out.push_str(".*");
            rest = after;
            continue;
        }
        match c {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
        rest = &rest[c.len_utf8()..];
    }

    out.push('$');
    out
}
