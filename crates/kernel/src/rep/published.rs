//! Published view → representation converter.
//!
//! The read-optimized variant: a published view already carries its
//! children and resolved property values, so nothing external is
//! consulted and the conversion cannot fail.

use serde_json::Value as JsonValue;

use crate::models::PublishedContent;

use super::ContentRepresentation;

/// Map a published view to a wire representation.
///
/// `has_children` is a local emptiness check on the view's own children
/// collection. Property values go through the serializable projection:
/// JSON-safe values pass through unchanged, opaque resolved objects
/// degrade to their string form, absent values become null.
pub fn to_representation(view: &PublishedContent) -> ContentRepresentation {
    ContentRepresentation {
        id: view.id,
        name: view.name.clone(),
        content_type: view.content_type.clone(),
        parent_id: None,
        sort_order: 0,
        template: view.template.clone(),
        has_children: !view.children.is_empty(),
        created: Some(view.created),
        updated: Some(view.published_at),
        properties: view
            .properties
            .iter()
            .map(|property| {
                let value = property
                    .value
                    .as_ref()
                    .map(|v| v.serializable())
                    .unwrap_or(JsonValue::Null);
                (property.alias.clone(), value)
            })
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::{PublishedProperty, ResolvedValue};

    use super::*;

    fn view(children: Vec<Uuid>, properties: Vec<PublishedProperty>) -> PublishedContent {
        PublishedContent {
            id: Uuid::now_v7(),
            name: "Front page".to_string(),
            content_type: "page".to_string(),
            template: Some("page.html".to_string()),
            children,
            properties,
            created: Utc::now(),
            published_at: Utc::now(),
        }
    }

    #[test]
    fn has_children_is_a_local_emptiness_check() {
        let rep = to_representation(&view(vec![], vec![]));
        assert!(!rep.has_children);

        let rep = to_representation(&view(vec![Uuid::now_v7()], vec![]));
        assert!(rep.has_children);
    }

    #[test]
    fn values_pass_through_or_degrade_to_strings() {
        let properties = vec![
            PublishedProperty {
                alias: "title".to_string(),
                value: Some(ResolvedValue::Json(serde_json::json!("Hello"))),
            },
            PublishedProperty {
                alias: "count".to_string(),
                value: Some(ResolvedValue::Opaque(Arc::new(42))),
            },
            PublishedProperty {
                alias: "teaser".to_string(),
                value: None,
            },
        ];

        let rep = to_representation(&view(vec![], properties));

        assert_eq!(rep.properties["title"], serde_json::json!("Hello"));
        assert_eq!(rep.properties["count"], serde_json::json!("42"));
        assert_eq!(rep.properties["teaser"], JsonValue::Null);
    }
}
