//! Route for tracking the answers given to a story.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use tracing::instrument;

use ourstory_story::application::query_handlers::{self, TrackedStory};
use ourstory_story::domain::commands::TrackStory;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /
#[instrument(skip(state, command))]
async fn track_story(
    State(state): State<AppState>,
    Json(command): Json<TrackStory>,
) -> Result<Json<TrackedStory>, ApiError> {
    let tracked = query_handlers::track_story(
        &command,
        &*state.story_repository,
        &*state.response_repository,
    )
    .await?;
    Ok(Json(tracked))
}

/// Returns the router for response tracking.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(track_story))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use ourstory_test_support::InMemoryStoryRepository;
    use serde_json::json;

    use super::*;
    use crate::routes::test_support::{Parts, send};

    fn app() -> Router {
        router().with_state(
            Parts {
                stories: Arc::new(InMemoryStoryRepository::with_story(
                    "maya",
                    json!({ "partnerName": "Maya", "passcode": "2580" }),
                )),
                ..Parts::default()
            }
            .into_state(),
        )
    }

    #[tokio::test]
    async fn test_track_with_correct_passcode_returns_story_and_responses() {
        let body = json!({ "linkOrId": "https://ourstory.example/?id=maya", "passcode": "2580" });

        let (status, json) = send(app(), "POST", "/", Some(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["story_id"], "maya");
        assert_eq!(json["partner_name"], "Maya");
        assert_eq!(json["responses"], json!([]));
    }

    #[tokio::test]
    async fn test_track_with_wrong_passcode_returns_401() {
        let body = json!({ "linkOrId": "maya", "passcode": "1402" });

        let (status, json) = send(app(), "POST", "/", Some(&body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "invalid_passcode");
    }

    #[tokio::test]
    async fn test_track_with_blank_input_returns_400() {
        let body = json!({ "linkOrId": " ", "passcode": "2580" });

        let (status, json) = send(app(), "POST", "/", Some(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Please enter a valid Story Link or ID.");
    }

    #[tokio::test]
    async fn test_track_unknown_story_returns_404() {
        let body = json!({ "linkOrId": "ghost", "passcode": "2580" });

        let (status, _) = send(app(), "POST", "/", Some(&body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
