//! HTTP client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use ourstory_core::error::DomainError;
use ourstory_core::generation::{PromptVariant, TextGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::error::GenerationError;

/// Public Gemini API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: String,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}

/// Gemini text-generation client.
///
/// Without an API key every call fails with
/// [`GenerationError::MissingApiKey`] and no request is sent.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client against `base_url` (without a trailing slash).
    #[must_use]
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let model = model.into();
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        debug!(model = %model, url = %base_url, has_key = api_key.is_some(), "created Gemini client");
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends `prompt` and returns the trimmed text of the first candidate.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when no key is configured, the request
    /// fails, the provider rejects it, or the answer holds no text.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "generation request failed");
                GenerationError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "generation service error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.into_text().ok_or(GenerationError::EmptyResponse)?;
        debug!(text_len = text.len(), "generation succeeded");
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(
        &self,
        variant: PromptVariant,
        prompt: &str,
    ) -> Result<String, DomainError> {
        debug!(variant = variant.as_str(), "generating text");
        Ok(self.generate(prompt).await?)
    }
}
