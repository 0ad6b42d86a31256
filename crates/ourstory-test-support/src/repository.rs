//! Test repositories — in-memory and failing implementations of the store
//! collaborator traits.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use ourstory_core::error::DomainError;
use ourstory_core::repository::{
    NewResponse, ResponseRepository, StoredResponse, StoredStory, StoryRepository,
};
use uuid::Uuid;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 0, 0, 0).unwrap()
}

/// A story repository backed by a `HashMap`. Generated ids are UUID strings;
/// inserting under a taken custom id returns `DomainError::DuplicateId`.
#[derive(Debug, Default)]
pub struct InMemoryStoryRepository {
    stories: Mutex<HashMap<String, StoredStory>>,
}

impl InMemoryStoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding one record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_story(id: &str, data: serde_json::Value) -> Self {
        let repo = Self::new();
        repo.stories.lock().unwrap().insert(
            id.to_owned(),
            StoredStory {
                id: id.to_owned(),
                data,
                created_at: epoch(),
            },
        );
        repo
    }

    /// Returns the record stored under `id`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get(&self, id: &str) -> Option<StoredStory> {
        self.stories.lock().unwrap().get(id).cloned()
    }

    /// Number of stored records.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn len(&self) -> usize {
        self.stories.lock().unwrap().len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn fetch_story(&self, id: &str) -> Result<Option<StoredStory>, DomainError> {
        Ok(self.stories.lock().unwrap().get(id).cloned())
    }

    async fn insert_story(
        &self,
        data: &serde_json::Value,
        custom_id: Option<&str>,
    ) -> Result<StoredStory, DomainError> {
        let mut stories = self.stories.lock().unwrap();
        let id = match custom_id {
            Some(id) if stories.contains_key(id) => {
                return Err(DomainError::DuplicateId(id.to_owned()));
            }
            Some(id) => id.to_owned(),
            None => Uuid::new_v4().to_string(),
        };
        let record = StoredStory {
            id: id.clone(),
            data: data.clone(),
            created_at: epoch(),
        };
        stories.insert(id, record.clone());
        Ok(record)
    }
}

/// A story repository that always returns an infrastructure error. Useful for
/// testing the offline fallback paths.
#[derive(Debug)]
pub struct FailingStoryRepository;

#[async_trait]
impl StoryRepository for FailingStoryRepository {
    async fn fetch_story(&self, _id: &str) -> Result<Option<StoredStory>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn insert_story(
        &self,
        _data: &serde_json::Value,
        _custom_id: Option<&str>,
    ) -> Result<StoredStory, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A response repository backed by a `Vec`. Lists newest first; responses
/// with equal timestamps list in reverse insertion order.
#[derive(Debug, Default)]
pub struct InMemoryResponseRepository {
    responses: Mutex<Vec<StoredResponse>>,
}

impl InMemoryResponseRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded response in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn recorded(&self) -> Vec<StoredResponse> {
        self.responses.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn record_response(&self, response: NewResponse) -> Result<StoredResponse, DomainError> {
        let stored = StoredResponse::from(response);
        self.responses.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_responses(
        &self,
        story_id: Option<&str>,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        let mut listed: Vec<StoredResponse> = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| story_id.is_none_or(|id| r.story_id.as_deref() == Some(id)))
            .cloned()
            .collect();
        // Stable sort keeps reverse insertion order among equal timestamps.
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}

/// A response repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingResponseRepository;

#[async_trait]
impl ResponseRepository for FailingResponseRepository {
    async fn record_response(&self, _response: NewResponse) -> Result<StoredResponse, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_responses(
        &self,
        _story_id: Option<&str>,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
