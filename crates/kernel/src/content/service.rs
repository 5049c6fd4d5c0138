//! Content tree service.
//!
//! In-memory store for content nodes with the structural operations the
//! representation mapper deliberately refuses to perform: moving,
//! reordering, re-templating, and publishing go through here, never
//! through a generic update payload.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::models::{ContentItem, CreateContent, PublishedContent};
use crate::rep::ChildLookup;
use crate::schema::TypeRegistry;

use super::publish::{PublishedStore, resolve};

/// Service for content node operations.
#[derive(Clone)]
pub struct ContentService {
    inner: Arc<ContentServiceInner>,
}

struct ContentServiceInner {
    types: TypeRegistry,
    items: DashMap<Uuid, ContentItem>,
    published: PublishedStore,
}

impl ContentService {
    /// Create a new content service.
    pub fn new(types: TypeRegistry, published: PublishedStore) -> Self {
        Self {
            inner: Arc::new(ContentServiceInner {
                types,
                items: DashMap::new(),
                published,
            }),
        }
    }

    /// Create a new content node.
    pub fn create(&self, input: CreateContent) -> Result<ContentItem> {
        let content_type = self
            .inner
            .types
            .content_type(&input.content_type)
            .with_context(|| format!("unknown content type '{}'", input.content_type))?;

        if let Some(parent_id) = input.parent_id {
            if !self.inner.items.contains_key(&parent_id) {
                anyhow::bail!("parent {parent_id} not found");
            }
        }

        let mut item = ContentItem::new(content_type, &input.name, input.parent_id);
        item.template = input.template;
        item.sort_order = self.next_sort_order(input.parent_id);
        for (alias, value) in input.properties {
            item.set_property_value(&alias, value);
        }

        self.inner.items.insert(item.id, item.clone());
        info!(item_id = %item.id, content_type = %item.content_type.alias, "content created");
        Ok(item)
    }

    /// Load a content node by id.
    pub fn load(&self, id: Uuid) -> Option<ContentItem> {
        self.inner.items.get(&id).map(|r| r.clone())
    }

    /// Mutate a content node in place and return the updated copy.
    ///
    /// The closure runs under the store entry's guard; it must not call
    /// back into this service.
    pub fn update_with(
        &self,
        id: Uuid,
        mutate: impl FnOnce(&mut ContentItem),
    ) -> Option<ContentItem> {
        let mut entry = self.inner.items.get_mut(&id)?;
        mutate(&mut entry);
        entry.updated = Utc::now();
        Some(entry.clone())
    }

    /// Delete a node and its descendants, along with any published
    /// snapshots they have.
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
            self.inner.published.remove(*node_id);
        }

        info!(item_id = %id, removed = doomed.len(), "content deleted");
        true
    }

    /// Children of a node, ordered by sort order.
    pub fn children_of(&self, id: Uuid) -> Vec<ContentItem> {
        let mut children: Vec<ContentItem> = self
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
    ///
    /// Refuses to create cycles: a node cannot move under itself or any
    /// of its descendants.
    pub fn move_node(&self, id: Uuid, new_parent: Option<Uuid>) -> Result<Option<ContentItem>> {
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
        info!(item_id = %id, parent = ?new_parent, "content moved");
        Ok(updated)
    }

    /// Reorder the children of a node to match the given id sequence.
    pub fn sort_children(&self, parent: Uuid, ordered: &[Uuid]) -> Result<()> {
        for child_id in ordered {
            let is_child = self
                .inner
                .items
                .get(child_id)
                .is_some_and(|entry| entry.parent_id == Some(parent));
            if !is_child {
                anyhow::bail!("{child_id} is not a child of {parent}");
            }
        }

        for (position, child_id) in ordered.iter().enumerate() {
            self.update_with(*child_id, |item| {
                item.sort_order = position as i32;
            });
        }
        Ok(())
    }

    /// Assign a render template to a node.
    pub fn set_template(&self, id: Uuid, template: Option<String>) -> Option<ContentItem> {
        self.update_with(id, |item| {
            item.template = template;
        })
    }

    /// Publish a node: snapshot it into a resolved, read-only view.
    pub fn publish(&self, id: Uuid) -> Option<Arc<PublishedContent>> {
        let item = self.load(id)?;
        let children = self.children_of(id).iter().map(|child| child.id).collect();
        let view = Arc::new(resolve(&item, children));
        self.inner.published.insert(view.clone());
        info!(item_id = %id, "content published");
        Some(view)
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
impl ChildLookup for ContentService {
    async fn has_children(&self, id: Uuid) -> Result<bool> {
        Ok(self
            .inner
            .items
            .iter()
            .any(|entry| entry.parent_id == Some(id)))
    }
}
