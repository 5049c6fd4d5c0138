//! Content ↔ representation converters.

use anyhow::Result;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::models::{ContentItem, ContentType};

use super::{ChildLookup, ContentRepresentation, ContentTemplate, property_map};

/// Map a content node to its wire representation.
///
/// The property map covers every property type on the node's schema;
/// values the node does not hold come out as null. `has_children` is
/// answered by the owning tree service, and a failure there fails the
/// whole mapping call.
pub async fn to_representation(
    item: &ContentItem,
    children: &dyn ChildLookup,
) -> Result<ContentRepresentation> {
    Ok(ContentRepresentation {
        id: item.id,
        name: item.name.clone(),
        content_type: item.content_type.alias.clone(),
        parent_id: item.parent_id,
        sort_order: item.sort_order,
        template: item.template.clone(),
        has_children: children.has_children(item.id).await?,
        created: Some(item.created),
        updated: Some(item.updated),
        properties: property_map(&item.content_type.properties, &item.properties),
    })
}

/// Apply an inbound representation to a content node in place.
///
/// The name always follows the payload. Property values are written only
/// for aliases the node's schema defines; unknown aliases are skipped
/// without error. Parent, sort order, and template are deliberately not
/// mapped: a generic update payload must never be able to move, reorder,
/// or re-template a node. Those changes go through the explicit service
/// operations instead.
pub fn apply_representation(rep: &ContentRepresentation, item: &mut ContentItem) {
    item.name = rep.name.clone();

    for (alias, value) in &rep.properties {
        if item.has_property(alias) {
            item.properties.insert(alias.clone(), value.clone());
        } else {
            debug!(alias = %alias, item = %item.id, "dropping unknown property alias");
        }
    }
}

/// Build a blank creation scaffold for a content type: every schema alias
/// mapped to an empty string.
pub fn template_scaffold(content_type: &ContentType) -> ContentTemplate {
    ContentTemplate {
        content_type: content_type.alias.clone(),
        properties: content_type
            .properties
            .iter()
            .map(|property_type| {
                (
                    property_type.alias.clone(),
                    JsonValue::String(String::new()),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::models::{PropertyKind, PropertyType};

    use super::*;

    struct NoChildren;

    #[async_trait]
    impl ChildLookup for NoChildren {
        async fn has_children(&self, _id: Uuid) -> Result<bool> {
            Ok(false)
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl ChildLookup for FailingLookup {
        async fn has_children(&self, _id: Uuid) -> Result<bool> {
            anyhow::bail!("tree service unavailable")
        }
    }

    fn article_type() -> Arc<ContentType> {
        Arc::new(ContentType {
            alias: "article".to_string(),
            name: "Article".to_string(),
            properties: vec![
                PropertyType::new("title", "Title", PropertyKind::Text).required(),
                PropertyType::new("body", "Body", PropertyKind::TextLong),
            ],
        })
    }

    #[tokio::test]
    async fn unset_properties_map_to_null() {
        let item = ContentItem::new(article_type(), "Post", None);

        let rep = to_representation(&item, &NoChildren).await.unwrap();

        assert_eq!(rep.properties.len(), 2);
        assert_eq!(rep.properties["title"], JsonValue::Null);
        assert_eq!(rep.properties["body"], JsonValue::Null);
    }

    #[tokio::test]
    async fn child_lookup_errors_propagate() {
        let item = ContentItem::new(article_type(), "Post", None);

        assert!(to_representation(&item, &FailingLookup).await.is_err());
    }

    #[test]
    fn apply_skips_unknown_aliases() {
        let mut item = ContentItem::new(article_type(), "Post", None);
        let rep = ContentRepresentation {
            name: "Post".to_string(),
            properties: HashMap::from([
                ("title".to_string(), serde_json::json!("Hello")),
                ("ghost".to_string(), serde_json::json!("x")),
            ]),
            ..Default::default()
        };

        apply_representation(&rep, &mut item);

        assert_eq!(item.property_value("title"), Some(&serde_json::json!("Hello")));
        assert!(item.property_value("ghost").is_none());
        assert_eq!(item.properties.len(), 1);
    }

    #[test]
    fn apply_never_touches_structural_fields() {
        let parent = Uuid::now_v7();
        let mut item = ContentItem::new(article_type(), "Post", Some(parent));
        item.sort_order = 3;
        item.template = Some("article.html".to_string());

        let rep = ContentRepresentation {
            name: "Renamed".to_string(),
            parent_id: Some(Uuid::now_v7()),
            sort_order: 99,
            template: Some("hijacked.html".to_string()),
            ..Default::default()
        };

        apply_representation(&rep, &mut item);

        assert_eq!(item.name, "Renamed");
        assert_eq!(item.parent_id, Some(parent));
        assert_eq!(item.sort_order, 3);
        assert_eq!(item.template.as_deref(), Some("article.html"));
    }

    #[tokio::test]
    async fn round_trip_apply_is_idempotent() {
        let mut item = ContentItem::new(article_type(), "Post", None);
        item.set_property_value("title", serde_json::json!("Hello"));

        let rep = to_representation(&item, &NoChildren).await.unwrap();
        apply_representation(&rep, &mut item);
        let once = item.clone();
        apply_representation(&rep, &mut item);

        assert_eq!(item.name, once.name);
        assert_eq!(item.properties, once.properties);
    }

    #[test]
    fn scaffold_covers_schema_with_empty_strings() {
        let scaffold = template_scaffold(&article_type());

        assert_eq!(scaffold.content_type, "article");
        assert_eq!(scaffold.properties.len(), 2);
        assert_eq!(scaffold.properties["title"], serde_json::json!(""));
        assert_eq!(scaffold.properties["body"], serde_json::json!(""));
    }
}
