//! Domain models.

pub mod content;
pub mod media;
pub mod member;
pub mod published;
pub mod types;

pub use content::{ContentItem, CreateContent};
pub use media::{CreateMedia, MediaItem};
pub use member::{CreateMember, Member};
pub use published::{PublishedContent, PublishedProperty, RenderedMarkdown, ResolvedValue};
pub use types::{ContentType, MediaType, MemberType, PropertyKind, PropertyType};
