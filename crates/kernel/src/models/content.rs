//! Content aggregate.
//!
//! A content item is a node in the content tree: it has a name, a position
//! (parent and sort order), an optional template, and a property bag whose
//! shape is defined by its content type.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::types::ContentType;

/// A mutable editorial content node.
///
/// Not serialized directly; the wire shape is always a representation.
#[derive(Debug, Clone)]
pub struct ContentItem {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Node name.
    pub name: String,

    /// Parent node, None for tree roots.
    pub parent_id: Option<Uuid>,

    /// Position among siblings.
    pub sort_order: i32,

    /// Assigned render template, if any.
    pub template: Option<String>,

    /// Schema this node is built from.
    pub content_type: Arc<ContentType>,

    /// Property values keyed by alias. May hold values for only a subset
    /// of the schema's aliases; missing entries read as absent.
    pub properties: HashMap<String, JsonValue>,

    /// When the node was created.
    pub created: DateTime<Utc>,

    /// When the node was last changed.
    pub updated: DateTime<Utc>,
}

/// Input for creating a new content node.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContent {
    /// Content type alias.
    #[serde(rename = "type")]
    pub content_type: String,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub template: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, JsonValue>,
}

impl ContentItem {
    /// Create a fresh node of the given type.
    pub fn new(content_type: Arc<ContentType>, name: &str, parent_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.to_string(),
            parent_id,
            sort_order: 0,
            template: None,
            content_type,
            properties: HashMap::new(),
            created: now,
            updated: now,
        }
    }

    /// Whether the schema defines a property with this alias.
    ///
    /// Aliases are case-sensitive; no normalization happens anywhere.
    pub fn has_property(&self, alias: &str) -> bool {
        self.content_type.properties.iter().any(|p| p.alias == alias)
    }

    /// Current value for an alias, if one is set.
    pub fn property_value(&self, alias: &str) -> Option<&JsonValue> {
        self.properties.get(alias)
    }

    /// Set a property value by alias.
    ///
    /// Writes only aliases the schema defines; anything else is dropped so
    /// that a value bag can never grow keys the type does not know about.
    pub fn set_property_value(&mut self, alias: &str, value: JsonValue) {
        if self.has_property(alias) {
            self.properties.insert(alias.to_string(), value);
        }
    }
}
