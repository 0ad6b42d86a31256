//! Routes for recording and listing proposal responses.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use ourstory_core::repository::StoredResponse;
use tracing::{info, instrument};

use ourstory_story::application::{command_handlers, query_handlers};
use ourstory_story::domain::commands::RecordResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /
#[instrument(skip(state, command), fields(story_id = ?command.story_id, kind = ?command.kind))]
async fn record_response(
    State(state): State<AppState>,
    Json(command): Json<RecordResponse>,
) -> Result<(StatusCode, Json<StoredResponse>), ApiError> {
    info!("handling record_response command");

    let stored = command_handlers::handle_record_response(
        &command,
        state.clock.as_ref(),
        &*state.response_repository,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /
#[instrument(skip(state))]
async fn list_responses(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredResponse>>, ApiError> {
    let responses = query_handlers::list_responses(&*state.response_repository).await?;
    Ok(Json(responses))
}

/// Returns the router for the responses resource.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(record_response).get(list_responses))
}
