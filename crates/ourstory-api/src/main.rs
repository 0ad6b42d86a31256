//! Our Story API server entry point.

use std::sync::Arc;

use ourstory_api::config::AppConfig;
use ourstory_api::error::AppError;
use ourstory_api::state::AppState;
use ourstory_api::{build_router, telemetry};
use ourstory_core::clock::SystemClock;
use ourstory_generation::GeminiClient;
use ourstory_store::{PgResponseRepository, PgStoryRepository};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let telemetry = telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Our Story API server");

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    ourstory_store::run_migrations(&pool).await?;

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }
    let generator = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
    );

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgStoryRepository::new(pool.clone())),
        Arc::new(PgResponseRepository::new(pool)),
        Arc::new(generator),
        &config.public_base_url,
    );
    let app = build_router(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    telemetry.shutdown();
    Ok(())
}
