//! Member aggregate.
//!
//! Members are registered site users with a profile shaped by a member
//! type. Unlike content and media they have no tree position.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::types::MemberType;

/// A registered member.
///
/// Not serialized directly; the wire shape is always a representation.
#[derive(Debug, Clone)]
pub struct Member {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Login name, unique across members.
    pub username: String,

    /// Contact email.
    pub email: String,

    /// Schema this member's profile is built from.
    pub member_type: Arc<MemberType>,

    /// Profile property values keyed by alias.
    pub properties: HashMap<String, JsonValue>,

    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for registering a new member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    /// Member type alias.
    #[serde(rename = "type")]
    pub member_type: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub properties: HashMap<String, JsonValue>,
}

impl Member {
    /// Create a fresh member of the given type.
    pub fn new(member_type: Arc<MemberType>, username: &str, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: email.to_string(),
            member_type,
            properties: HashMap::new(),
            created: now,
            updated: now,
        }
    }

    /// Whether the schema defines a property with this alias.
    pub fn has_property(&self, alias: &str) -> bool {
        self.member_type.properties.iter().any(|p| p.alias == alias)
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
