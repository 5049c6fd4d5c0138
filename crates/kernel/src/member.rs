//! Member service.
//!
//! In-memory store for registered members. Members have no tree
//! position, so there is no child query or move operation here.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::models::{CreateMember, Member};
use crate::schema::TypeRegistry;

/// Service for member operations.
#[derive(Clone)]
pub struct MemberService {
    inner: Arc<MemberServiceInner>,
}

struct MemberServiceInner {
    types: TypeRegistry,
    members: DashMap<Uuid, Member>,
}

impl MemberService {
    /// Create a new member service.
    pub fn new(types: TypeRegistry) -> Self {
        Self {
            inner: Arc::new(MemberServiceInner {
                types,
                members: DashMap::new(),
            }),
        }
    }

    /// Register a new member.
    pub fn create(&self, input: CreateMember) -> Result<Member> {
        let member_type = self
            .inner
            .types
            .member_type(&input.member_type)
            .with_context(|| format!("unknown member type '{}'", input.member_type))?;

        if self.find_by_username(&input.username).is_some() {
            anyhow::bail!("username '{}' is already taken", input.username);
        }

        let mut member = Member::new(member_type, &input.username, &input.email);
        for (alias, value) in input.properties {
            member.set_property_value(&alias, value);
        }

        self.inner.members.insert(member.id, member.clone());
        info!(member_id = %member.id, username = %member.username, "member registered");
        Ok(member)
    }

    /// Load a member by id.
    pub fn load(&self, id: Uuid) -> Option<Member> {
        self.inner.members.get(&id).map(|r| r.clone())
    }

    /// Find a member by username.
    pub fn find_by_username(&self, username: &str) -> Option<Member> {
        self.inner
            .members
            .iter()
            .find(|entry| entry.username == username)
            .map(|entry| entry.clone())
    }

    /// Mutate a member in place and return the updated copy.
    pub fn update_with(&self, id: Uuid, mutate: impl FnOnce(&mut Member)) -> Option<Member> {
        let mut entry = self.inner.members.get_mut(&id)?;
        mutate(&mut entry);
        entry.updated = Utc::now();
        Some(entry.clone())
    }

    /// Delete a member.
    pub fn delete(&self, id: Uuid) -> bool {
        let removed = self.inner.members.remove(&id).is_some();
        if removed {
            info!(member_id = %id, "member deleted");
        }
        removed
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.inner.members.len()
    }

    /// Check if no members are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.members.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use crate::models::MemberType;

    use super::*;

    fn service() -> MemberService {
        let types = TypeRegistry::new();
        types.register_member_type(MemberType {
            alias: "subscriber".to_string(),
            name: "Subscriber".to_string(),
            properties: vec![],
        });
        MemberService::new(types)
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let service = service();
        let input = CreateMember {
            member_type: "subscriber".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            properties: HashMap::new(),
        };

        service.create(input.clone()).unwrap();
        assert!(service.create(input).is_err());
    }

    #[test]
    fn find_by_username_matches_exactly() {
        let service = service();
        service
            .create(CreateMember {
                member_type: "subscriber".to_string(),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                properties: HashMap::new(),
            })
            .unwrap();

        assert!(service.find_by_username("ada").is_some());
        assert!(service.find_by_username("Ada").is_none());
    }
}
