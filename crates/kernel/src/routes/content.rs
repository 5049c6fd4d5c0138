//! Content API route handlers.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ContentType, CreateContent};
use crate::rep::{self, ContentPropertyInfo, ContentRepresentation, ContentTemplate};
use crate::state::AppState;

/// Request body for moving a node.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    /// New parent id; None moves the node to the root.
    pub parent_id: Option<Uuid>,
}

/// Request body for reordering a node's children.
#[derive(Debug, Deserialize)]
pub struct SortRequest {
    /// Child ids in their new order.
    pub order: Vec<Uuid>,
}

/// Request body for assigning a render template.
#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    /// Template name; None clears the assignment.
    pub template: Option<String>,
}

/// Create the content router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/content/types", get(list_types))
        .route("/api/content/types/{alias}/scaffold", get(type_scaffold))
        .route("/api/content", post(create_content))
        .route(
            "/api/content/{id}",
            get(get_content).put(update_content).delete(delete_content),
        )
        .route("/api/content/{id}/meta", get(content_meta))
        .route("/api/content/{id}/children", get(content_children))
        .route("/api/content/{id}/move", post(move_content))
        .route("/api/content/{id}/sort", post(sort_children))
        .route("/api/content/{id}/template", post(set_template))
        .route("/api/content/{id}/publish", post(publish_content))
}

/// List all content types.
async fn list_types(State(state): State<AppState>) -> Json<Vec<ContentType>> {
    let types = state
        .types()
        .content_types()
        .iter()
        .map(|t| (**t).clone())
        .collect();
    Json(types)
}

/// Blank creation scaffold for a content type.
async fn type_scaffold(
    State(state): State<AppState>,
    Path(alias): Path<String>,
) -> AppResult<Json<ContentTemplate>> {
    let content_type = state.types().content_type(&alias).ok_or(AppError::NotFound)?;
    Ok(Json(rep::content::template_scaffold(&content_type)))
}

/// Create a content node from a creation payload.
async fn create_content(
    State(state): State<AppState>,
    Json(input): Json<CreateContent>,
) -> AppResult<Json<ContentRepresentation>> {
    if state.types().content_type(&input.content_type).is_none() {
        return Err(AppError::NotFound);
    }

    let item = state
        .content()
        .create(input)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let rep = rep::content::to_representation(&item, state.content()).await?;
    Ok(Json(rep))
}

/// Get a content node's representation.
async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContentRepresentation>> {
    let item = state.content().load(id).ok_or(AppError::NotFound)?;
    let rep = rep::content::to_representation(&item, state.content()).await?;
    Ok(Json(rep))
}

/// Apply an inbound representation to a content node.
///
/// Responds with the re-mapped node so clients observe exactly which
/// parts of the payload took effect.
async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(incoming): Json<ContentRepresentation>,
) -> AppResult<Json<ContentRepresentation>> {
    let updated = state
        .content()
        .update_with(id, |item| rep::content::apply_representation(&incoming, item))
        .ok_or(AppError::NotFound)?;

    let rep = rep::content::to_representation(&updated, state.content()).await?;
    Ok(Json(rep))
}

/// Delete a content node and its descendants.
async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    if state.content().delete(id) {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound)
    }
}

/// Property schema description for a content node.
async fn content_meta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<std::collections::HashMap<String, ContentPropertyInfo>>> {
    let item = state.content().load(id).ok_or(AppError::NotFound)?;
    Ok(Json(rep::property_schema(&item.content_type.properties)))
}

/// List a node's children as representations.
async fn content_children(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<ContentRepresentation>>> {
    if state.content().load(id).is_none() {
        return Err(AppError::NotFound);
    }

    let mut reps = Vec::new();
    for child in state.content().children_of(id) {
        reps.push(rep::content::to_representation(&child, state.content()).await?);
    }
    Ok(Json(reps))
}

/// Move a node under a new parent.
///
/// This is the explicit structural operation that a generic PUT payload
/// can never trigger.
async fn move_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MoveRequest>,
) -> AppResult<Json<ContentRepresentation>> {
    let moved = state
        .content()
        .move_node(id, request.parent_id)
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or(AppError::NotFound)?;

    let rep = rep::content::to_representation(&moved, state.content()).await?;
    Ok(Json(rep))
}

/// Reorder a node's children.
async fn sort_children(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SortRequest>,
) -> AppResult<Json<Vec<ContentRepresentation>>> {
    if state.content().load(id).is_none() {
        return Err(AppError::NotFound);
    }

    state
        .content()
        .sort_children(id, &request.order)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut reps = Vec::new();
    for child in state.content().children_of(id) {
        reps.push(rep::content::to_representation(&child, state.content()).await?);
    }
    Ok(Json(reps))
}

/// Assign or clear a node's render template.
async fn set_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TemplateRequest>,
) -> AppResult<Json<ContentRepresentation>> {
    let updated = state
        .content()
        .set_template(id, request.template)
        .ok_or(AppError::NotFound)?;

    let rep = rep::content::to_representation(&updated, state.content()).await?;
    Ok(Json(rep))
}

/// Publish a node and return the published representation.
async fn publish_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContentRepresentation>> {
    let view = state.content().publish(id).ok_or(AppError::NotFound)?;
    Ok(Json(rep::published::to_representation(&view)))
}
