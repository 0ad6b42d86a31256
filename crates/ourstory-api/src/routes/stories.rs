//! Routes for publishing, resolving and decoding stories.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use ourstory_core::story::{Story, StoryDraft};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use ourstory_story::application::command_handlers::{self, ShareLinkCreated};
use ourstory_story::application::query_handlers::{self, ResolvedStory, StoryView};
use ourstory_story::domain::commands::CreateShareLink;
use ourstory_story::domain::links::StoryQuery;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /: the draft fields plus an optional link name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    /// Story fields as entered by the creator.
    #[serde(flatten)]
    pub draft: StoryDraft,
    /// Optional human-chosen link name.
    #[serde(default)]
    pub custom_id: Option<String>,
}

/// Query string for GET /decode.
#[derive(Debug, Deserialize)]
pub struct DecodeQuery {
    /// The inline story token.
    #[serde(default)]
    pub data: String,
}

/// Response body for GET /decode. `story` is null for a malformed token.
#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    /// The decoded, normalized story.
    pub story: Option<Story>,
}

/// POST /
#[instrument(skip(state, request), fields(custom_id = ?request.custom_id))]
async fn create_story(
    State(state): State<AppState>,
    Json(request): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<ShareLinkCreated>), ApiError> {
    let command = CreateShareLink {
        draft: request.draft,
        custom_id: request.custom_id,
    };

    info!("handling create_share_link command");

    let created = command_handlers::handle_create_share_link(
        &command,
        &state.public_base_url,
        &*state.story_repository,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /resolve?id=&data=
///
/// The last-seen fallback belongs to the client, so a request without
/// parameters resolves to the defaults.
#[instrument(skip(state, query), fields(id = ?query.id, has_data = query.data.is_some()))]
async fn resolve_story(
    State(state): State<AppState>,
    Query(query): Query<StoryQuery>,
) -> Json<ResolvedStory> {
    Json(query_handlers::resolve_link(&query, &*state.story_repository).await)
}

/// GET /decode?data=
async fn decode_story(Query(query): Query<DecodeQuery>) -> Json<DecodeResponse> {
    Json(DecodeResponse {
        story: ourstory_codec::decode_story(&query.data),
    })
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoryView>, ApiError> {
    let view = query_handlers::get_story_by_id(&id, &*state.story_repository).await?;
    Ok(Json(view))
}

/// Returns the router for the stories resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_story))
        .route("/resolve", get(resolve_story))
        .route("/decode", get(decode_story))
        .route("/{id}", get(get_story))
}
