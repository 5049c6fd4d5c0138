//! Published content view.
//!
//! A published view is a read-only snapshot taken from a content item at
//! publish time. It is fully resolved: children are carried on the view
//! itself, and each property holds its resolved runtime value rather than
//! the raw stored JSON.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// A resolved property value on a published view.
///
/// Property editors may resolve stored values into arbitrary runtime
/// objects. Only `Json` values are safe to place on the wire as-is;
/// everything else must degrade to its string rendering instead of
/// failing the response.
#[derive(Clone)]
pub enum ResolvedValue {
    /// A value that is safe to serialize unchanged.
    Json(JsonValue),

    /// An opaque resolved object; serialized via its `Display` output.
    Opaque(Arc<dyn fmt::Display + Send + Sync>),
}

impl ResolvedValue {
    /// Project this value into something serializable.
    ///
    /// `Json` passes through unchanged; `Opaque` falls back to its string
    /// conversion.
    pub fn serializable(&self) -> JsonValue {
        match self {
            ResolvedValue::Json(value) => value.clone(),
            ResolvedValue::Opaque(display) => JsonValue::String(display.to_string()),
        }
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Json(value) => f.debug_tuple("Json").field(value).finish(),
            ResolvedValue::Opaque(display) => {
                f.debug_tuple("Opaque").field(&display.to_string()).finish()
            }
        }
    }
}

/// One resolved property on a published view.
#[derive(Debug, Clone)]
pub struct PublishedProperty {
    /// Property type alias.
    pub alias: String,

    /// Resolved value; None when the item held no value at publish time.
    pub value: Option<ResolvedValue>,
}

impl PublishedProperty {
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// A read-only, fully resolved published rendering of a content node.
#[derive(Debug, Clone)]
pub struct PublishedContent {
    pub id: Uuid,
    pub name: String,

    /// Content type alias.
    pub content_type: String,

    /// Assigned render template at publish time.
    pub template: Option<String>,

    /// Child node ids, resolved at publish time. Emptiness is the local
    /// answer to "has children" for published views.
    pub children: Vec<Uuid>,

    /// Resolved properties in schema order.
    pub properties: Vec<PublishedProperty>,

    pub created: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
}

/// Markdown source that renders to HTML on demand.
///
/// Published markdown properties resolve to this wrapper: the HTML is
/// produced when the value is displayed, which is what the serializable
/// projection does for opaque values.
pub struct RenderedMarkdown {
    source: String,
}

impl RenderedMarkdown {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl fmt::Display for RenderedMarkdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parser = pulldown_cmark::Parser::new(&self.source);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        f.write_str(html.trim_end())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn json_value_passes_through() {
        let value = ResolvedValue::Json(serde_json::json!({"a": 1}));
        assert_eq!(value.serializable(), serde_json::json!({"a": 1}));
    }

    #[test]
    fn opaque_value_degrades_to_string() {
        let value = ResolvedValue::Opaque(Arc::new(42));
        assert_eq!(value.serializable(), serde_json::json!("42"));
    }

    #[test]
    fn markdown_renders_on_display() {
        let markdown = RenderedMarkdown::new("# Title\n\nBody text.");
        let html = markdown.to_string();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
    }
}
