//! Media ↔ representation converters.

use anyhow::Result;
use tracing::debug;

use crate::models::MediaItem;

use super::{ChildLookup, MediaRepresentation, property_map};

/// Map a media node to its wire representation.
///
/// Same contract as the content converter, against the media tree's own
/// child query.
pub async fn to_representation(
    item: &MediaItem,
    children: &dyn ChildLookup,
) -> Result<MediaRepresentation> {
    Ok(MediaRepresentation {
        id: item.id,
        name: item.name.clone(),
        media_type: item.media_type.alias.clone(),
        parent_id: item.parent_id,
        sort_order: item.sort_order,
        has_children: children.has_children(item.id).await?,
        created: Some(item.created),
        updated: Some(item.updated),
        properties: property_map(&item.media_type.properties, &item.properties),
    })
}

/// Apply an inbound representation to a media node in place.
///
/// Name follows the payload; unknown property aliases are skipped; parent
/// and sort order stay untouched (moves go through the media service).
pub fn apply_representation(rep: &MediaRepresentation, item: &mut MediaItem) {
    item.name = rep.name.clone();

    for (alias, value) in &rep.properties {
        if item.has_property(alias) {
            item.properties.insert(alias.clone(), value.clone());
        } else {
            debug!(alias = %alias, item = %item.id, "dropping unknown property alias");
        }
    }
}
