//! Routes for generated text.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use ourstory_generation::{LetterDetails, MemoryDetails};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /future-reflection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FutureReflectionRequest {
    /// Who said yes.
    pub partner_name: String,
}

/// Response body for every generation route.
#[derive(Debug, Serialize)]
pub struct GeneratedText {
    /// The generated text.
    pub text: String,
}

/// POST /poetic-summary
#[instrument(skip(state, memory))]
async fn poetic_summary(
    State(state): State<AppState>,
    Json(memory): Json<MemoryDetails>,
) -> Result<Json<GeneratedText>, ApiError> {
    let text = ourstory_generation::generate_poetic_summary(&memory, &*state.text_generator).await?;
    Ok(Json(GeneratedText { text }))
}

/// POST /love-letter
#[instrument(skip(state, details))]
async fn love_letter(
    State(state): State<AppState>,
    Json(details): Json<LetterDetails>,
) -> Result<Json<GeneratedText>, ApiError> {
    let text = ourstory_generation::generate_love_letter(&details, &*state.text_generator).await?;
    Ok(Json(GeneratedText { text }))
}

/// POST /future-reflection
#[instrument(skip(state, request))]
async fn future_reflection(
    State(state): State<AppState>,
    Json(request): Json<FutureReflectionRequest>,
) -> Json<GeneratedText> {
    let text =
        ourstory_generation::generate_future_reflection(&request.partner_name, &*state.text_generator)
            .await;
    Json(GeneratedText { text })
}

/// Returns the router for generated text.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/poetic-summary", post(poetic_summary))
        .route("/love-letter", post(love_letter))
        .route("/future-reflection", post(future_reflection))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use ourstory_generation::FUTURE_REFLECTION_FALLBACK;
    use ourstory_test_support::FailingTextGenerator;
    use serde_json::json;

    use super::*;
    use crate::routes::test_support::{Parts, send};

    fn failing_app(retryable: bool) -> Router {
        router().with_state(
            Parts {
                generator: Arc::new(FailingTextGenerator { retryable }),
                ..Parts::default()
            }
            .into_state(),
        )
    }

    #[tokio::test]
    async fn test_poetic_summary_returns_generated_text() {
        let app = router().with_state(Parts::default().into_state());
        let body = json!({ "title": "First Date", "date": "June 2021", "description": "Rain" });

        let (status, json) = send(app, "POST", "/poetic-summary", Some(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["text"], "generated");
    }

    #[tokio::test]
    async fn test_poetic_summary_with_missing_fields_returns_400() {
        let app = router().with_state(Parts::default().into_state());

        let (status, _) =
            send(app, "POST", "/poetic-summary", Some(&json!({ "title": "Only" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_love_letter_failure_returns_502_with_retry_flag() {
        let body = json!({ "partnerName": "Maya", "howWeMet": "school" });

        let (status, json) = send(failing_app(true), "POST", "/love-letter", Some(&body)).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "generation_failed");
        assert_eq!(json["retryable"], true);
    }

    #[tokio::test]
    async fn test_future_reflection_falls_back_when_generation_fails() {
        let body = json!({ "partnerName": "Maya" });

        let (status, json) =
            send(failing_app(false), "POST", "/future-reflection", Some(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["text"], FUTURE_REFLECTION_FALLBACK);
    }
}
