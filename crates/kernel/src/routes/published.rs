//! Published content route handlers.
//!
//! Read-optimized endpoint: representations come from published
//! snapshots, so no tree service is consulted.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::rep::{self, ContentRepresentation};
use crate::state::AppState;

/// Create the published content router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/published/{id}", get(get_published))
}

/// Get the published representation of a node.
async fn get_published(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContentRepresentation>> {
    let view = state.published().get(id).ok_or(AppError::NotFound)?;
    Ok(Json(rep::published::to_representation(&view)))
}
