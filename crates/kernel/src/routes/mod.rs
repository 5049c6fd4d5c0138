//! HTTP route handlers.

pub mod content;
pub mod health;
pub mod media;
pub mod member;
pub mod published;

use axum::Router;

use crate::state::AppState;

/// Build the full API router (without middleware layers).
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(content::router())
        .merge(media::router())
        .merge(member::router())
        .merge(published::router())
}
