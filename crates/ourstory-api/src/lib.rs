//! Our Story API — HTTP surface over the story sharing, generation and
//! store crates.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the PUBLIC_BASE_URL origin once the
    // frontend is served from a fixed host.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/stories", routes::stories::router())
        .nest("/api/v1/responses", routes::responses::router())
        .nest("/api/v1/track", routes::track::router())
        .nest("/api/v1/generate", routes::generate::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
