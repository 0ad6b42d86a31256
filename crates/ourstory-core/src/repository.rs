//! Collaborator traits for the hosted data store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DomainError;

/// A persisted story record. `data` holds a long-key story-shaped value.
#[derive(Debug, Clone)]
pub struct StoredStory {
    /// Opaque record identifier, either custom or generated.
    pub id: String,
    /// Story-shaped payload as written by the creator.
    pub data: serde_json::Value,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// A proposal response about to be recorded.
#[derive(Debug, Clone)]
pub struct NewResponse {
    /// Response identifier.
    pub id: Uuid,
    /// The story the response belongs to, when known.
    pub story_id: Option<String>,
    /// Responder display name.
    pub name: String,
    /// Response label.
    pub response: String,
    /// When the response was given.
    pub recorded_at: DateTime<Utc>,
}

/// A recorded proposal response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredResponse {
    /// Response identifier.
    pub id: Uuid,
    /// The story the response belongs to, when known.
    pub story_id: Option<String>,
    /// Responder display name.
    pub name: String,
    /// Response label.
    pub response: String,
    /// When the response was given.
    pub created_at: DateTime<Utc>,
}

impl From<NewResponse> for StoredResponse {
    fn from(response: NewResponse) -> Self {
        Self {
            id: response.id,
            story_id: response.story_id,
            name: response.name,
            response: response.response,
            created_at: response.recorded_at,
        }
    }
}

/// Repository for story records.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Fetches a story record by identifier. Returns `Ok(None)` when no
    /// record exists.
    async fn fetch_story(&self, id: &str) -> Result<Option<StoredStory>, DomainError>;

    /// Inserts a story record, using `custom_id` when given and a generated
    /// identifier otherwise.
    ///
    /// Returns `DomainError::DuplicateId` when `custom_id` is already taken.
    async fn insert_story(
        &self,
        data: &serde_json::Value,
        custom_id: Option<&str>,
    ) -> Result<StoredStory, DomainError>;
}

/// Repository for proposal responses.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Records a response.
    async fn record_response(&self, response: NewResponse) -> Result<StoredResponse, DomainError>;

    /// Lists responses newest first, optionally restricted to one story.
    async fn list_responses(
        &self,
        story_id: Option<&str>,
    ) -> Result<Vec<StoredResponse>, DomainError>;
}
