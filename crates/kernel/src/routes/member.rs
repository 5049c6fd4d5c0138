//! Member API route handlers.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::CreateMember;
use crate::rep::{self, ContentPropertyInfo, MemberRepresentation};
use crate::state::AppState;

/// Create the member router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/member", post(create_member))
        .route(
            "/api/member/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/api/member/{id}/meta", get(member_meta))
}

/// Register a member.
async fn create_member(
    State(state): State<AppState>,
    Json(input): Json<CreateMember>,
) -> AppResult<Json<MemberRepresentation>> {
    if state.types().member_type(&input.member_type).is_none() {
        return Err(AppError::NotFound);
    }

    let member = state
        .members()
        .create(input)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(rep::member::to_representation(&member)))
}

/// Get a member's representation.
async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MemberRepresentation>> {
    let member = state.members().load(id).ok_or(AppError::NotFound)?;
    Ok(Json(rep::member::to_representation(&member)))
}

/// Apply an inbound representation to a member.
async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(incoming): Json<MemberRepresentation>,
) -> AppResult<Json<MemberRepresentation>> {
    let updated = state
        .members()
        .update_with(id, |member| {
            rep::member::apply_representation(&incoming, member);
        })
        .ok_or(AppError::NotFound)?;

    Ok(Json(rep::member::to_representation(&updated)))
}

/// Delete a member.
async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    if state.members().delete(id) {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound)
    }
}

/// Property schema description for a member's profile.
async fn member_meta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<std::collections::HashMap<String, ContentPropertyInfo>>> {
    let member = state.members().load(id).ok_or(AppError::NotFound)?;
    Ok(Json(rep::property_schema(&member.member_type.properties)))
}
