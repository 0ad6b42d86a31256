//! Test text generators — mock `TextGenerator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use ourstory_core::error::DomainError;
use ourstory_core::generation::{PromptVariant, TextGenerator};

/// A generator that returns the configured text on every call and records
/// every prompt it receives.
#[derive(Debug)]
pub struct StubTextGenerator {
    reply: String,
    prompts: Mutex<Vec<(PromptVariant, String)>>,
}

impl StubTextGenerator {
    /// Create a generator that always replies with `reply`.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every `(variant, prompt)` received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<(PromptVariant, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubTextGenerator {
    async fn generate_text(
        &self,
        variant: PromptVariant,
        prompt: &str,
    ) -> Result<String, DomainError> {
        self.prompts
            .lock()
            .unwrap()
            .push((variant, prompt.to_owned()));
        Ok(self.reply.clone())
    }
}

/// A generator that always fails with `DomainError::Generation`.
#[derive(Debug, Clone, Copy)]
pub struct FailingTextGenerator {
    /// Value of the `retryable` flag on the returned error.
    pub retryable: bool,
}

#[async_trait]
impl TextGenerator for FailingTextGenerator {
    async fn generate_text(
        &self,
        _variant: PromptVariant,
        _prompt: &str,
    ) -> Result<String, DomainError> {
        Err(DomainError::Generation {
            message: "service unavailable".into(),
            retryable: self.retryable,
        })
    }
}
