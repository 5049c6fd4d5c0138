#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]
//! Common test utilities for integration tests.
//!
//! These tests use the real kernel code: the actual routers, services,
//! and type registry, with no mocks.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use ritratto_kernel::models::{ContentType, MediaType, MemberType, PropertyKind, PropertyType};
use ritratto_kernel::routes;
use ritratto_kernel::schema::TypeRegistry;
use ritratto_kernel::state::AppState;

/// Test application wrapper using the real kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with a seeded type registry.
    pub fn new() -> Self {
        let state = AppState::from_registry(seeded_registry());
        let router = routes::api_router().with_state(state.clone());
        Self { router, state }
    }

    /// Send a request to the application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).expect("request"))
            .await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Request::delete(uri).body(Body::empty()).expect("request"))
            .await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, body: Value) -> Response {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put_json(&self, uri: &str, body: Value) -> Response {
        self.request(
            Request::put(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }
}

/// A registry with one type of each kind.
pub fn seeded_registry() -> TypeRegistry {
    let registry = TypeRegistry::new();

    registry.register_content_type(ContentType {
        alias: "article".to_string(),
        name: "Article".to_string(),
        properties: vec![
            PropertyType::new("title", "Title", PropertyKind::Text)
                .required()
                .validation("^.{1,200}$"),
            PropertyType::new("body", "Body", PropertyKind::Markdown),
            PropertyType::new("rating", "Rating", PropertyKind::Integer),
        ],
    });

    registry.register_media_type(MediaType {
        alias: "folder".to_string(),
        name: "Folder".to_string(),
        properties: vec![PropertyType::new("notes", "Notes", PropertyKind::Text)],
    });

    registry.register_member_type(MemberType {
        alias: "subscriber".to_string(),
        name: "Subscriber".to_string(),
        properties: vec![
            PropertyType::new("display_name", "Display name", PropertyKind::Text),
            PropertyType::new("newsletter", "Newsletter opt-in", PropertyKind::Boolean),
        ],
    });

    registry
}

/// Parse a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    use http_body_util::BodyExt;

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(&body);
        panic!("Failed to parse JSON: {text}");
    })
}
