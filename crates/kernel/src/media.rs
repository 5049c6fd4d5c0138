//! Media tree service.
//!
//! In-memory store for media nodes. Mirrors the content service without
//! templates or publishing; the media tree answers its own child query.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::models::{CreateMedia, MediaItem};
use crate::rep::ChildLookup;
use crate::schema::TypeRegistry;

/// Service for media node operations.
#[derive(Clone)]
pub struct MediaService {
    inner: Arc<MediaServiceInner>,
}

struct MediaServiceInner {
    types: TypeRegistry,
    items: DashMap<Uuid, MediaItem>,
}

impl MediaService {
    /// Create a new media service.
    pub fn new(types: TypeRegistry) -> Self {
        Self {
            inner: Arc::new(MediaServiceInner {
                types,
                items: DashMap::new(),
            }),
        }
    }

    /// Create a new media node.
    pub fn create(&self, input: CreateMedia) -> Result<MediaItem> {
        let media_type = self
            .inner
            .types
            .media_type(&input.media_type)
            .with_context(|| format!("unknown media type '{}'", input.media_type))?;

        if let Some(parent_id) = input.parent_id {
            if !self.inner.items.contains_key(&parent_id) {
                anyhow::bail!("parent {parent_id} not found");
            }
        }

        let mut item = MediaItem::new(media_type, &input.name, input.parent_id);
        item.sort_order = self.next_sort_order(input.parent_id);
        for (alias, value) in input.properties {
            item.set_property_value(&alias, value);
        }

        self.inner.items.insert(item.id, item.clone());
        info!(item_id = %item.id, media_type = %item.media_type.alias, "media created");
        Ok(item)
    }

    /// Load a media node by id.
    pub fn load(&self, id: Uuid) -> Option<MediaItem> {
        self.inner.items.get(&id).map(|r| r.clone())
    }

    /// Mutate a media node in place and return the updated copy.
    pub fn update_with(
        &self,
        id: Uuid,
        mutate: impl FnOnce(&mut MediaItem),
    ) -> Option<MediaItem> {
        let mut entry = self.inner.items.get_mut(&id)?;
        mutate(&mut entry);
        entry.updated = Utc::now();
        Some(entry.clone())
    }

    /// Delete a node and its descendants.
    pub fn delete(&self, id: Uuid) -> bool {
        if !self.inner.items.contains_key(&id) {
            return false;
        }

        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let parent = doomed[cursor];
            cursor += 1;
            for entry in self.inner.items.iter() {
                if entry.parent_id == Some(parent) {
                    doomed.push(entry.id);
                }
            }
        }

        for node_id in &doomed {
            self.inner.items.remove(node_id);
        }

        info!(item_id = %id, removed = doomed.len(), "media deleted");
        true
    }

    /// Children of a node, ordered by sort order.
    pub fn children_of(&self, id: Uuid) -> Vec<MediaItem> {
        let mut children: Vec<MediaItem> = self
            .inner
            .items
            .iter()
            .filter(|entry| entry.parent_id == Some(id))
            .map(|entry| entry.clone())
            .collect();
        children.sort_by_key(|child| child.sort_order);
        children
    }

    /// Move a node under a new parent (None moves it to the root).
    pub fn move_node(&self, id: Uuid, new_parent: Option<Uuid>) -> Result<Option<MediaItem>> {
        if !self.inner.items.contains_key(&id) {
            return Ok(None);
        }

        if let Some(parent_id) = new_parent {
            if !self.inner.items.contains_key(&parent_id) {
                anyhow::bail!("parent {parent_id} not found");
            }

            let mut ancestor = Some(parent_id);
            while let Some(current) = ancestor {
                if current == id {
                    anyhow::bail!("cannot move a node under itself or its descendants");
                }
                ancestor = self.inner.items.get(&current).and_then(|e| e.parent_id);
            }
        }

        let sort_order = self.next_sort_order(new_parent);
        let updated = self.update_with(id, |item| {
            item.parent_id = new_parent;
            item.sort_order = sort_order;
        });
        info!(item_id = %id, parent = ?new_parent, "media moved");
        Ok(updated)
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    fn next_sort_order(&self, parent: Option<Uuid>) -> i32 {
        self.inner
            .items
            .iter()
            .filter(|entry| entry.parent_id == parent)
            .count() as i32
    }
}

#[async_trait]
impl ChildLookup for MediaService {
    async fn has_children(&self, id: Uuid) -> Result<bool> {
        Ok(self
            .inner
            .items
            .iter()
            .any(|entry| entry.parent_id == Some(id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use crate::models::MediaType;

    use super::*;

    fn service() -> MediaService {
        let types = TypeRegistry::new();
        types.register_media_type(MediaType {
            alias: "folder".to_string(),
            name: "Folder".to_string(),
            properties: vec![],
        });
        MediaService::new(types)
    }

    #[tokio::test]
    async fn media_tree_answers_its_own_child_query() {
        let service = service();
        let root = service
            .create(CreateMedia {
                media_type: "folder".to_string(),
                name: "Uploads".to_string(),
                parent_id: None,
                properties: HashMap::new(),
            })
            .unwrap();

        assert!(!service.has_children(root.id).await.unwrap());

        service
            .create(CreateMedia {
                media_type: "folder".to_string(),
                name: "2026".to_string(),
                parent_id: Some(root.id),
                properties: HashMap::new(),
            })
            .unwrap();

        assert!(service.has_children(root.id).await.unwrap());
    }

    #[test]
    fn create_rejects_unknown_type() {
        let service = service();
        let result = service.create(CreateMedia {
            media_type: "image".to_string(),
            name: "Photo".to_string(),
            parent_id: None,
            properties: HashMap::new(),
        });
        assert!(result.is_err());
    }
}
