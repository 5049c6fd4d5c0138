//! Representation mapping.
//!
//! Explicit, typed converters between domain aggregates and their wire
//! representations: one module per entity pair, plus the schema
//! derivation they share. There is no mapping registry; each conversion
//! is a plain function.

pub mod content;
pub mod media;
pub mod member;
pub mod published;
mod types;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::PropertyType;

pub use types::{
    ContentPropertyInfo, ContentRepresentation, ContentTemplate, MediaRepresentation,
    MemberRepresentation,
};

/// Child-existence query on the owning tree service.
///
/// Called inline once per mapped node; no batching or caching happens at
/// this layer, and a failure aborts the single mapping call.
#[async_trait]
pub trait ChildLookup: Send + Sync {
    async fn has_children(&self, id: Uuid) -> Result<bool>;
}

/// Build a representation property map from a schema and a value bag.
///
/// The output key set is exactly the schema's alias set: every defined
/// property appears, and aliases the bag holds values for beyond the
/// schema (there should be none) do not. Missing values become null.
pub(crate) fn property_map(
    schema: &[PropertyType],
    values: &HashMap<String, JsonValue>,
) -> HashMap<String, JsonValue> {
    schema
        .iter()
        .map(|property_type| {
            let value = values
                .get(&property_type.alias)
                .cloned()
                .unwrap_or(JsonValue::Null);
            (property_type.alias.clone(), value)
        })
        .collect()
}

/// Derive the wire schema description for a property type list.
///
/// Pure function of the schema; current values play no part.
pub fn property_schema(schema: &[PropertyType]) -> HashMap<String, ContentPropertyInfo> {
    schema
        .iter()
        .map(|property_type| {
            (
                property_type.alias.clone(),
                ContentPropertyInfo {
                    label: property_type.label.clone(),
                    validation_regex: property_type.validation_regex.clone(),
                    validation_required: property_type.required,
                },
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::PropertyKind;

    #[test]
    fn property_map_enumerates_schema_not_values() {
        let schema = vec![
            PropertyType::new("title", "Title", PropertyKind::Text).required(),
            PropertyType::new("body", "Body", PropertyKind::TextLong),
        ];
        let mut values = HashMap::new();
        values.insert("body".to_string(), serde_json::json!("text"));

        let map = property_map(&schema, &values);

        assert_eq!(map.len(), 2);
        assert_eq!(map["title"], JsonValue::Null);
        assert_eq!(map["body"], serde_json::json!("text"));
    }

    #[test]
    fn property_schema_carries_validation_metadata() {
        let schema = vec![
            PropertyType::new("title", "Title", PropertyKind::Text)
                .required()
                .validation("^.{1,200}$"),
            PropertyType::new("body", "Body", PropertyKind::TextLong),
        ];

        let infos = property_schema(&schema);

        assert_eq!(
            infos["title"],
            ContentPropertyInfo {
                label: "Title".to_string(),
                validation_regex: Some("^.{1,200}$".to_string()),
                validation_required: true,
            }
        );
        assert!(infos["body"].validation_regex.is_none());
        assert!(!infos["body"].validation_required);
    }
}
