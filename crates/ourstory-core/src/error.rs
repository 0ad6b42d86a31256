//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No story record exists for the identifier.
    #[error("story not found: {0}")]
    StoryNotFound(String),

    /// A custom story identifier is already in use.
    #[error("story id already taken: {0}")]
    DuplicateId(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The supplied passcode does not match the story's passcode.
    #[error("incorrect passcode")]
    InvalidPasscode,

    /// The text-generation collaborator failed.
    #[error("text generation failed: {message}")]
    Generation {
        /// Human-readable failure description.
        message: String,
        /// Whether the caller may retry the same request.
        retryable: bool,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
