//! Label content: plain text, HTML, or Markdown-flavored text
//!
//! Markdown labels are written between backticks inside a quoted label
//! (``A["`**bold**`"]``). HTML labels are detected by the presence of a tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The flavor of a label's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Text,
    Html,
    Markdown,
}

/// A label with its flavor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Content {
    pub kind: ContentKind,
    pub value: String,
}

impl Content {
    /// Plain text content
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            value: value.into(),
        }
    }

    /// HTML content
    pub fn html(value: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Html,
            value: value.into(),
        }
    }

    /// Markdown content, stored without its surrounding backticks
    pub fn markdown(value: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Markdown,
            value: value.into(),
        }
    }

    /// Classify an already-unquoted label
    pub fn detect(raw: &str) -> Self {
        if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
            return Self::markdown(&raw[1..raw.len() - 1]);
        }
        if looks_like_html(raw) {
            return Self::html(raw);
        }
        Self::text(raw)
    }

    /// Label text as it appears in source, before quoting
    pub fn to_source(&self) -> String {
        match self.kind {
            ContentKind::Markdown => format!("`{}`", self.value),
            ContentKind::Text | ContentKind::Html => self.value.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::detect(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::detect(&value)
    }
}

fn looks_like_html(raw: &str) -> bool {
    let Some(open) = raw.find('<') else {
        return false;
    };
    let rest = &raw[open + 1..];
    let starts_tag = rest
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
    starts_tag && rest.contains('>')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_plain_text() {
        let content = Content::detect("Start here");
        assert_eq!(content.kind, ContentKind::Text);
        assert_eq!(content.value, "Start here");
    }

    #[test]
    fn test_detect_markdown() {
        let content = Content::detect("`**bold** move`");
        assert_eq!(content.kind, ContentKind::Markdown);
        assert_eq!(content.value, "**bold** move");
        assert_eq!(content.to_source(), "`**bold** move`");
    }

    #[test]
    fn test_detect_html() {
        assert_eq!(Content::detect("<b>hi</b>").kind, ContentKind::Html);
        assert_eq!(Content::detect("line<br/>break").kind, ContentKind::Html);
        assert_eq!(Content::detect("a < b > c").kind, ContentKind::Text);
    }

    #[test]
    fn test_single_backtick_is_text() {
        assert_eq!(Content::detect("`").kind, ContentKind::Text);
    }
}
