//! Wire representations.
//!
//! These are the flat, serializable projections the API exchanges with
//! clients. Every field is defaultable so partial inbound payloads
//! deserialize; the converters decide which fields they honor.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Wire projection of a content node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRepresentation {
    pub id: Uuid,
    pub name: String,

    /// Content type alias.
    #[serde(rename = "type")]
    pub content_type: String,

    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub template: Option<String>,

    /// Computed at mapping time; never stored on the aggregate.
    pub has_children: bool,

    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,

    /// One entry per property type defined on the node's schema, keyed by
    /// alias. Absent values are null.
    pub properties: HashMap<String, JsonValue>,
}

/// Wire projection of a media node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaRepresentation {
    pub id: Uuid,
    pub name: String,

    /// Media type alias.
    #[serde(rename = "type")]
    pub media_type: String,

    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub has_children: bool,

    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,

    pub properties: HashMap<String, JsonValue>,
}

/// Wire projection of a member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRepresentation {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    /// Member type alias.
    #[serde(rename = "type")]
    pub member_type: String,

    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,

    pub properties: HashMap<String, JsonValue>,
}

/// Schema description of one property, derived from its property type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPropertyInfo {
    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_regex: Option<String>,

    pub validation_required: bool,
}

/// Blank scaffold for creating a node of a given type: every schema alias
/// present, every value an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTemplate {
    /// Content type alias.
    #[serde(rename = "type")]
    pub content_type: String,

    pub properties: HashMap<String, JsonValue>,
}
