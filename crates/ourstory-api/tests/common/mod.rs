//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use ourstory_core::clock::Clock;
use ourstory_store::{PgResponseRepository, PgStoryRepository};
use ourstory_test_support::{FixedClock, StubTextGenerator};
use sqlx::PgPool;
use tower::ServiceExt;

use ourstory_api::build_router;
use ourstory_api::state::AppState;

/// Base URL share links are rendered under in tests.
pub const BASE_URL: &str = "https://ourstory.example/";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 2, 14, 20, 0, 0).unwrap(),
    ))
}

/// Build the full app router over real `PostgreSQL` repositories, a fixed
/// clock and a stub text generator. Uses the same router as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let app_state = AppState::new(
        fixed_clock(),
        Arc::new(PgStoryRepository::new(pool.clone())),
        Arc::new(PgResponseRepository::new(pool)),
        Arc::new(StubTextGenerator::new("generated")),
        BASE_URL,
    );
    build_router(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
