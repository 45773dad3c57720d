//! Typed element targets.

use std::fmt;
use std::str::FromStr;

/// Where to find an element on the page.
///
/// Prefer a stable attribute selector; `Nth` is the positional fallback for
/// repeated rows that carry no distinguishing attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
    /// The `index`-th (0-based) match of a CSS selector.
    Nth { selector: String, index: usize },
    /// First match of `selector` inside the element `parent` resolves to.
    Within { parent: Box<Locator>, selector: String },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn nth(selector: impl Into<String>, index: usize) -> Self {
        Locator::Nth {
            selector: selector.into(),
            index,
        }
    }

    /// Scope a CSS selector to this element.
    pub fn within(&self, selector: impl Into<String>) -> Self {
        Locator::Within {
            parent: Box::new(self.clone()),
            selector: selector.into(),
        }
    }

    /// XPath matching an element whose `title` equals `text` exactly.
    pub fn exact_title(text: &str) -> Self {
        Locator::XPath(format!("//*[@title={}]", xpath_literal(text)))
    }
}

/// Quote `text` as an XPath 1.0 string literal.
///
/// XPath has no escape sequence, so text holding both quote kinds is split
/// into a `concat()` call.
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    if !text.contains('\'') {
        return format!("'{}'", text);
    }

    let parts: Vec<String> = text
        .split('"')
        .map(|part| format!("\"{}\"", part))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css={}", s),
            Locator::XPath(s) => write!(f, "xpath={}", s),
            Locator::Nth { selector, index } => write!(f, "css={} >> nth={}", selector, index),
            Locator::Within { parent, selector } => write!(f, "{} >> css={}", parent, selector),
        }
    }
}

impl FromStr for Locator {
    type Err = String;

    /// Parses `css=...`, `xpath=...`, or a bare selector. Bare selectors
    /// starting with `/` or `(` are taken as XPath, anything else as CSS.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty locator".to_string());
        }

        if let Some(rest) = s.strip_prefix("css=") {
            return non_empty(rest).map(Locator::css);
        }
        if let Some(rest) = s.strip_prefix("xpath=") {
            return non_empty(rest).map(Locator::xpath);
        }
        if s.starts_with('/') || s.starts_with("(/") {
            return Ok(Locator::xpath(s));
        }
        Ok(Locator::css(s))
    }
}

fn non_empty(rest: &str) -> Result<&str, String> {
    let rest = rest.trim();
    if rest.is_empty() {
        Err("locator prefix without a selector".to_string())
    } else {
        Ok(rest)
    }
}
