//! Publish pipeline.
//!
//! Publishing snapshots a mutable content node into a read-only,
//! fully resolved view: children are captured on the view itself and
//! property values are resolved per property kind.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{
    ContentItem, PropertyKind, PublishedContent, PublishedProperty, RenderedMarkdown,
    ResolvedValue,
};

/// Store of published snapshots.
#[derive(Clone, Default)]
pub struct PublishedStore {
    inner: Arc<DashMap<Uuid, Arc<PublishedContent>>>,
}

impl PublishedStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a published view by id.
    pub fn get(&self, id: Uuid) -> Option<Arc<PublishedContent>> {
        self.inner.get(&id).map(|r| r.clone())
    }

    /// Insert or replace a published view.
    pub fn insert(&self, view: Arc<PublishedContent>) {
        self.inner.insert(view.id, view);
    }

    /// Remove a published view.
    pub fn remove(&self, id: Uuid) {
        self.inner.remove(&id);
    }

    /// Number of published views.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no views are published.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Resolve a content node into a published view.
///
/// Properties are resolved in schema order. Markdown string values
/// resolve to a lazily-rendered wrapper (an opaque runtime object, not
/// JSON); everything else carries its stored JSON value. Absent values
/// stay absent.
pub fn resolve(item: &ContentItem, children: Vec<Uuid>) -> PublishedContent {
    let properties = item
        .content_type
        .properties
        .iter()
        .map(|property_type| {
            let value = item.property_value(&property_type.alias).map(|value| {
                match (property_type.kind, value.as_str()) {
                    (PropertyKind::Markdown, Some(source)) => {
                        ResolvedValue::Opaque(Arc::new(RenderedMarkdown::new(source)))
                    }
                    _ => ResolvedValue::Json(value.clone()),
                }
            });
            PublishedProperty {
                alias: property_type.alias.clone(),
                value,
            }
        })
        .collect();

    PublishedContent {
        id: item.id,
        name: item.name.clone(),
        content_type: item.content_type.alias.clone(),
        template: item.template.clone(),
        children,
        properties,
        created: item.created,
        published_at: Utc::now(),
    }
}
