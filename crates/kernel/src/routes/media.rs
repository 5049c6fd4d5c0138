//! Media API route handlers.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateMedia, MediaType};
use crate::rep::{self, ContentPropertyInfo, MediaRepresentation};
use crate::state::AppState;

use super::content::MoveRequest;

/// Create the media router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/media/types", get(list_types))
        .route("/api/media", post(create_media))
        .route(
            "/api/media/{id}",
            get(get_media).put(update_media).delete(delete_media),
        )
        .route("/api/media/{id}/meta", get(media_meta))
        .route("/api/media/{id}/children", get(media_children))
        .route("/api/media/{id}/move", post(move_media))
}

/// List all media types.
async fn list_types(State(state): State<AppState>) -> Json<Vec<MediaType>> {
    let types = state
        .types()
        .media_types()
        .iter()
        .map(|t| (**t).clone())
        .collect();
    Json(types)
}

/// Create a media node.
async fn create_media(
    State(state): State<AppState>,
    Json(input): Json<CreateMedia>,
) -> AppResult<Json<MediaRepresentation>> {
    if state.types().media_type(&input.media_type).is_none() {
        return Err(AppError::NotFound);
    }

    let item = state
        .media()
        .create(input)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let rep = rep::media::to_representation(&item, state.media()).await?;
    Ok(Json(rep))
}

/// Get a media node's representation.
async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MediaRepresentation>> {
    let item = state.media().load(id).ok_or(AppError::NotFound)?;
    let rep = rep::media::to_representation(&item, state.media()).await?;
    Ok(Json(rep))
}

/// Apply an inbound representation to a media node.
async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(incoming): Json<MediaRepresentation>,
) -> AppResult<Json<MediaRepresentation>> {
    let updated = state
        .media()
        .update_with(id, |item| rep::media::apply_representation(&incoming, item))
        .ok_or(AppError::NotFound)?;

    let rep = rep::media::to_representation(&updated, state.media()).await?;
    Ok(Json(rep))
}

/// Delete a media node and its descendants.
async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    if state.media().delete(id) {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound)
    }
}

/// Property schema description for a media node.
async fn media_meta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<std::collections::HashMap<String, ContentPropertyInfo>>> {
    let item = state.media().load(id).ok_or(AppError::NotFound)?;
    Ok(Json(rep::property_schema(&item.media_type.properties)))
}

/// List a node's children as representations.
async fn media_children(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<MediaRepresentation>>> {
    if state.media().load(id).is_none() {
        return Err(AppError::NotFound);
    }

    let mut reps = Vec::new();
    for child in state.media().children_of(id) {
        reps.push(rep::media::to_representation(&child, state.media()).await?);
    }
    Ok(Json(reps))
}

/// Move a media node under a new parent.
async fn move_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MoveRequest>,
) -> AppResult<Json<MediaRepresentation>> {
    let moved = state
        .media()
        .move_node(id, request.parent_id)
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or(AppError::NotFound)?;

    let rep = rep::media::to_representation(&moved, state.media()).await?;
    Ok(Json(rep))
}
