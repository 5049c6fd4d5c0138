//! Type registry.
//!
//! Holds the content, media, and member type definitions the mappers and
//! services resolve schemas from. Definitions are loaded from a TOML file
//! at startup and cached in memory for fast access.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::{ContentType, MediaType, MemberType, PropertyType};

/// Shape of the type definitions file.
#[derive(Debug, Deserialize)]
struct TypeDefinitions {
    #[serde(default)]
    content_types: Vec<ContentType>,

    #[serde(default)]
    media_types: Vec<MediaType>,

    #[serde(default)]
    member_types: Vec<MemberType>,
}

/// Registry of type definitions.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    inner: Arc<TypeRegistryInner>,
}

#[derive(Default)]
struct TypeRegistryInner {
    content: DashMap<String, Arc<ContentType>>,
    media: DashMap<String, Arc<MediaType>>,
    member: DashMap<String, Arc<MemberType>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load definitions from a TOML file. Aliases already registered are
    /// replaced.
    pub fn load_from_file(&self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read type definitions from {}", path.display()))?;
        let definitions: TypeDefinitions =
            toml::from_str(&raw).context("failed to parse type definitions")?;

        for content_type in definitions.content_types {
            self.register_content_type(content_type);
        }
        for media_type in definitions.media_types {
            self.register_media_type(media_type);
        }
        for member_type in definitions.member_types {
            self.register_member_type(member_type);
        }

        info!(
            content_types = self.inner.content.len(),
            media_types = self.inner.media.len(),
            member_types = self.inner.member.len(),
            "type definitions loaded"
        );
        Ok(())
    }

    /// Register a content type definition.
    pub fn register_content_type(&self, definition: ContentType) {
        check_validation_patterns(&definition.alias, &definition.properties);
        self.inner
            .content
            .insert(definition.alias.clone(), Arc::new(definition));
    }

    /// Register a media type definition.
    pub fn register_media_type(&self, definition: MediaType) {
        check_validation_patterns(&definition.alias, &definition.properties);
        self.inner
            .media
            .insert(definition.alias.clone(), Arc::new(definition));
    }

    /// Register a member type definition.
    pub fn register_member_type(&self, definition: MemberType) {
        check_validation_patterns(&definition.alias, &definition.properties);
        self.inner
            .member
            .insert(definition.alias.clone(), Arc::new(definition));
    }

    /// Get a content type by alias.
    pub fn content_type(&self, alias: &str) -> Option<Arc<ContentType>> {
        self.inner.content.get(alias).map(|r| r.clone())
    }

    /// Get a media type by alias.
    pub fn media_type(&self, alias: &str) -> Option<Arc<MediaType>> {
        self.inner.media.get(alias).map(|r| r.clone())
    }

    /// Get a member type by alias.
    pub fn member_type(&self, alias: &str) -> Option<Arc<MemberType>> {
        self.inner.member.get(alias).map(|r| r.clone())
    }

    /// List all content types.
    pub fn content_types(&self) -> Vec<Arc<ContentType>> {
        self.inner.content.iter().map(|r| r.value().clone()).collect()
    }

    /// List all media types.
    pub fn media_types(&self) -> Vec<Arc<MediaType>> {
        self.inner.media.iter().map(|r| r.value().clone()).collect()
    }

    /// List all member types.
    pub fn member_types(&self) -> Vec<Arc<MemberType>> {
        self.inner.member.iter().map(|r| r.value().clone()).collect()
    }

    /// Total number of registered types across all kinds.
    pub fn len(&self) -> usize {
        self.inner.content.len() + self.inner.media.len() + self.inner.member.len()
    }

    /// Check if the registry holds no definitions at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Warn about validation regexes that will never compile.
///
/// Value validation itself happens in the editing subsystem; registration
/// only surfaces broken patterns early, without rejecting the type.
fn check_validation_patterns(type_alias: &str, properties: &[PropertyType]) {
    for property in properties {
        if let Some(pattern) = &property.validation_regex {
            if let Err(e) = Regex::new(pattern) {
                warn!(
                    type_alias = %type_alias,
                    property = %property.alias,
                    error = %e,
                    "validation regex does not compile"
                );
            }
        }
    }
}
