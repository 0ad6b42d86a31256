//! Our Story — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ourstory_core::error::DomainError;
use ourstory_story::domain::links::DUPLICATE_ID_MESSAGE;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migrations could not be applied.
    #[error("migration error: {0}")]
    Migration(#[from] DomainError),

    /// Tracing or span export could not be set up.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Whether the same request may be retried. Only set for generation
    /// failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, retryable) = match self.0 {
            DomainError::StoryNotFound(_) => (
                StatusCode::NOT_FOUND,
                "story_not_found",
                self.0.to_string(),
                None,
            ),
            DomainError::DuplicateId(_) => (
                StatusCode::CONFLICT,
                "duplicate_id",
                DUPLICATE_ID_MESSAGE.to_owned(),
                None,
            ),
            DomainError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message, None)
            }
            DomainError::InvalidPasscode => (
                StatusCode::UNAUTHORIZED,
                "invalid_passcode",
                "Incorrect passcode.".to_owned(),
                None,
            ),
            DomainError::Generation { message, retryable } => (
                StatusCode::BAD_GATEWAY,
                "generation_failed",
                message,
                Some(retryable),
            ),
            DomainError::Infrastructure(_) => {
                error!(error = %self.0, "request failed on infrastructure error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "infrastructure_error",
                    self.0.to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
            retryable,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    async fn body_of(err: DomainError) -> serde_json::Value {
        let response = ApiError(err).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_story_not_found_maps_to_404() {
        assert_eq!(
            status_of(DomainError::StoryNotFound("maya".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_duplicate_id_maps_to_409_with_actionable_message() {
        assert_eq!(
            status_of(DomainError::DuplicateId("maya".into())),
            StatusCode::CONFLICT
        );

        let json = body_of(DomainError::DuplicateId("maya".into())).await;

        assert_eq!(json["error"], "duplicate_id");
        assert_eq!(
            json["message"],
            "This custom link name is already taken. Please choose another."
        );
        assert!(json.get("retryable").is_none());
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_bare_message() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );

        let json = body_of(DomainError::Validation("bad input".into())).await;

        assert_eq!(json["message"], "bad input");
    }

    #[test]
    fn test_invalid_passcode_maps_to_401() {
        assert_eq!(
            status_of(DomainError::InvalidPasscode),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_generation_maps_to_502_with_retryable_flag() {
        let err = || DomainError::Generation {
            message: "busy".into(),
            retryable: true,
        };
        assert_eq!(status_of(err()), StatusCode::BAD_GATEWAY);

        let json = body_of(err()).await;

        assert_eq!(json["error"], "generation_failed");
        assert_eq!(json["retryable"], true);
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
