//! Errors raised while talking to the generation provider.

use ourstory_core::error::DomainError;
use thiserror::Error;

/// A failed generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key is configured.
    #[error("missing Gemini API key; set GEMINI_API_KEY")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("request to generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("generation service returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The provider answered without any text.
    #[error("generation service returned no text")]
    EmptyResponse,
}

impl GenerationError {
    /// Whether repeating the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::EmptyResponse => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey => false,
        }
    }
}

impl From<GenerationError> for DomainError {
    fn from(e: GenerationError) -> Self {
        DomainError::Generation {
            retryable: e.is_retryable(),
            message: e.to_string(),
        }
    }
}
