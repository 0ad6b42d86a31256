//! Text-generation collaborator abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The kind of text being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptVariant {
    /// A two-line poem about one timeline memory.
    PoeticSummary,
    /// A full letter to the partner.
    LoveLetter,
    /// A short reflection written from ten years in the future.
    FutureReflection,
}

impl PromptVariant {
    /// Stable name used in logs and routes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PoeticSummary => "poetic-summary",
            Self::LoveLetter => "love-letter",
            Self::FutureReflection => "future-reflection",
        }
    }
}

/// A service that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`.
    ///
    /// Returns `DomainError::Generation` when the provider fails.
    async fn generate_text(&self, variant: PromptVariant, prompt: &str)
    -> Result<String, DomainError>;
}
