//! Media aggregate.
//!
//! Media items live in their own tree, parallel to content. They carry the
//! same schema-defined property bag but no render template.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::types::MediaType;

/// A node in the media tree.
///
/// Not serialized directly; the wire shape is always a representation.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Node name.
    pub name: String,

    /// Parent node, None for tree roots.
    pub parent_id: Option<Uuid>,

    /// Position among siblings.
    pub sort_order: i32,

    /// Schema this node is built from.
    pub media_type: Arc<MediaType>,

    /// Property values keyed by alias.
    pub properties: HashMap<String, JsonValue>,

    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a new media node.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedia {
    /// Media type alias.
    #[serde(rename = "type")]
    pub media_type: String,
    pub name: String,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub properties: HashMap<String, JsonValue>,
}

impl MediaItem {
    /// Create a fresh node of the given type.
    pub fn new(media_type: Arc<MediaType>, name: &str, parent_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.to_string(),
            parent_id,
            sort_order: 0,
            media_type,
            properties: HashMap::new(),
            created: now,
            updated: now,
        }
    }

    /// Whether the schema defines a property with this alias.
    pub fn has_property(&self, alias: &str) -> bool {
        self.media_type.properties.iter().any(|p| p.alias == alias)
    }

    /// Current value for an alias, if one is set.
    pub fn property_value(&self, alias: &str) -> Option<&JsonValue> {
        self.properties.get(alias)
    }

    /// Set a property value; aliases outside the schema are dropped.
    pub fn set_property_value(&mut self, alias: &str, value: JsonValue) {
        if self.has_property(alias) {
            self.properties.insert(alias.to_string(), value);
        }
    }
}
