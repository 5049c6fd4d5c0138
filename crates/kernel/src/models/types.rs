//! Schema definitions for content, media, and member types.
//!
//! A type definition is an ordered list of property types. The property
//! alias is the join key between the schema, the aggregate's value bag,
//! and the wire representation; it is case-sensitive and never normalized.

use serde::{Deserialize, Serialize};

/// The editor kind of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Text,
    TextLong,
    Markdown,
    Integer,
    Boolean,
    Date,
}

/// Schema definition for one named property on a type.
///
/// Immutable metadata owned by the type, not the aggregate. The mapper
/// enumerates these when building a representation, so every defined
/// property appears on the wire even when the aggregate holds no value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyType {
    /// Unique key within the owning type.
    pub alias: String,

    /// Display label for editors.
    pub label: String,

    /// Editor kind.
    pub kind: PropertyKind,

    /// Optional validation regular expression.
    #[serde(default)]
    pub validation_regex: Option<String>,

    /// Whether a value is mandatory.
    #[serde(default)]
    pub required: bool,
}

impl PropertyType {
    pub fn new(alias: &str, label: &str, kind: PropertyKind) -> Self {
        Self {
            alias: alias.into(),
            label: label.into(),
            kind,
            validation_regex: None,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validation(mut self, pattern: &str) -> Self {
        self.validation_regex = Some(pattern.into());
        self
    }
}

/// A content type: the schema for a tree node of editorial content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentType {
    /// Machine name (e.g. "article").
    pub alias: String,

    /// Display name.
    pub name: String,

    /// Ordered property definitions.
    #[serde(default)]
    pub properties: Vec<PropertyType>,
}

/// A media type: the schema for a node in the media tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyType>,
}

/// A member type: the schema for a registered member's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberType {
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyType>,
}
