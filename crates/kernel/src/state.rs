//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::content::{ContentService, PublishedStore};
use crate::media::MediaService;
use crate::member::MemberService;
use crate::schema::TypeRegistry;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Type registry.
    types: TypeRegistry,

    /// Content tree service.
    content: ContentService,

    /// Media tree service.
    media: MediaService,

    /// Member service.
    members: MemberService,

    /// Published snapshot store.
    published: PublishedStore,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// A missing type definitions file leaves the registry empty with a
    /// warning; the server still starts and serves 404s for unknown
    /// types.
    pub fn new(config: &Config) -> Result<Self> {
        let types = TypeRegistry::new();

        if config.types_file.exists() {
            types.load_from_file(&config.types_file)?;
        } else {
            warn!(
                path = %config.types_file.display(),
                "type definitions file not found, starting with an empty registry"
            );
        }

        info!(types = types.len(), "application state initialized");
        Ok(Self::from_registry(types))
    }

    /// Build state around an already-populated registry.
    pub fn from_registry(types: TypeRegistry) -> Self {
        let published = PublishedStore::new();
        let content = ContentService::new(types.clone(), published.clone());
        let media = MediaService::new(types.clone());
        let members = MemberService::new(types.clone());

        Self {
            inner: Arc::new(AppStateInner {
                types,
                content,
                media,
                members,
                published,
            }),
        }
    }

    /// Get the type registry.
    pub fn types(&self) -> &TypeRegistry {
        &self.inner.types
    }

    /// Get the content service.
    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    /// Get the media service.
    pub fn media(&self) -> &MediaService {
        &self.inner.media
    }

    /// Get the member service.
    pub fn members(&self) -> &MemberService {
        &self.inner.members
    }

    /// Get the published snapshot store.
    pub fn published(&self) -> &PublishedStore {
        &self.inner.published
    }
}
