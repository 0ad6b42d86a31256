//! Query handlers for the Story Sharing context.
//!
//! Resolution never fails: each source is tried in priority order and a
//! failing source is logged and skipped.

use chrono::{DateTime, Utc};
use ourstory_codec::decode_story;
use ourstory_core::cache::{KeyValueStore, STORY_DATA_KEY, STORY_ID_KEY};
use ourstory_core::error::DomainError;
use ourstory_core::repository::{ResponseRepository, StoredResponse, StoryRepository};
use ourstory_core::story::Story;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::commands::TrackStory;
use crate::domain::links::{INVALID_TRACKING_INPUT_MESSAGE, StoryQuery, extract_story_id};

/// Where a resolved story came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorySource {
    /// Fetched from the store by id.
    Store,
    /// Decoded from an inline token.
    Token,
    /// Recovered from the last-seen cache.
    Cache,
    /// Nothing resolved; built-in defaults.
    Defaults,
}

/// A story resolved from link parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStory {
    /// The story id, from the link or the cache.
    pub id: Option<String>,
    /// The normalized story.
    pub story: Story,
    /// Where the story came from.
    pub source: StorySource,
}

/// Read-only view of a stored story.
#[derive(Debug, Clone, Serialize)]
pub struct StoryView {
    /// The record id.
    pub id: String,
    /// The normalized story.
    pub story: Story,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// The answers given to one story.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedStory {
    /// The story id.
    pub story_id: String,
    /// The recipient's display name.
    pub partner_name: String,
    /// Responses, newest first.
    pub responses: Vec<StoredResponse>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn remember(cache: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = cache.set(key, value) {
        warn!(key, error = %e, "failed to update story cache");
    }
}

async fn from_store(id: &str, repo: &dyn StoryRepository) -> Option<Story> {
    match repo.fetch_story(id).await {
        Ok(Some(record)) => Some(Story::from_value(&record.data)),
        Ok(None) => {
            debug!(story_id = id, "no stored story for id");
            None
        }
        Err(e) => {
            warn!(story_id = id, error = %e, "story store lookup failed");
            None
        }
    }
}

fn from_cache(cache: &dyn KeyValueStore) -> Option<Story> {
    let raw = cache.get(STORY_DATA_KEY)?;
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => Some(Story::from_value(&value)),
        Err(e) => {
            warn!(error = %e, "discarding unreadable cached story");
            None
        }
    }
}

async fn from_link(
    query: &StoryQuery,
    repo: &dyn StoryRepository,
) -> Option<(Story, StorySource)> {
    if let Some(id) = non_blank(query.id.as_deref()) {
        if let Some(story) = from_store(id, repo).await {
            return Some((story, StorySource::Store));
        }
    }
    non_blank(query.data.as_deref())
        .and_then(decode_story)
        .map(|story| (story, StorySource::Token))
}

fn defaults() -> ResolvedStory {
    ResolvedStory {
        id: None,
        story: Story::default(),
        source: StorySource::Defaults,
    }
}

/// Resolves a story from link parameters alone, trying `id` then `data`.
/// With nothing resolved the built-in defaults are returned without an id.
///
/// No last-seen cache is consulted, so callers serving many clients cannot
/// hand one client's story to another.
pub async fn resolve_link(query: &StoryQuery, repo: &dyn StoryRepository) -> ResolvedStory {
    match from_link(query, repo).await {
        Some((story, source)) => ResolvedStory {
            id: non_blank(query.id.as_deref()).map(str::to_owned),
            story,
            source,
        },
        None => defaults(),
    }
}

/// Resolves a story from link parameters, falling back to a last-seen cache
/// owned by a single client.
///
/// Sources are tried in the order `id`, `data`, cache. A story resolved from
/// the store or a token is written to the cache, and a link id is remembered
/// separately. With nothing resolved the built-in defaults are returned
/// without an id.
pub async fn resolve_story(
    query: &StoryQuery,
    repo: &dyn StoryRepository,
    cache: &dyn KeyValueStore,
) -> ResolvedStory {
    let link_id = non_blank(query.id.as_deref());
    if let Some(id) = link_id {
        remember(cache, STORY_ID_KEY, id);
    }

    let mut resolved = from_link(query, repo).await;
    if let Some((story, _)) = &resolved {
        remember(cache, STORY_DATA_KEY, &story.to_value().to_string());
    } else {
        resolved = from_cache(cache).map(|s| (s, StorySource::Cache));
    }

    match resolved {
        Some((story, source)) => {
            let id = link_id
                .map(str::to_owned)
                .or_else(|| cache.get(STORY_ID_KEY));
            debug!(?source, story_id = ?id, "story resolved");
            ResolvedStory { id, story, source }
        }
        None => defaults(),
    }
}

/// Retrieves a stored story by id.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if no record exists for the id.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_story_by_id(id: &str, repo: &dyn StoryRepository) -> Result<StoryView, DomainError> {
    let record = repo
        .fetch_story(id)
        .await?
        .ok_or_else(|| DomainError::StoryNotFound(id.to_owned()))?;
    Ok(StoryView {
        story: Story::from_value(&record.data),
        id: record.id,
        created_at: record.created_at,
    })
}

/// Lists every recorded response, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_responses(
    repo: &dyn ResponseRepository,
) -> Result<Vec<StoredResponse>, DomainError> {
    repo.list_responses(None).await
}

/// Lists the responses to one story after checking its passcode.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the input holds no story id.
/// Returns `DomainError::StoryNotFound` if the story does not exist.
/// Returns `DomainError::InvalidPasscode` if the passcode does not match.
/// Returns `DomainError::Infrastructure` if either store fails.
pub async fn track_story(
    command: &TrackStory,
    stories: &dyn StoryRepository,
    responses: &dyn ResponseRepository,
) -> Result<TrackedStory, DomainError> {
    let story_id = extract_story_id(&command.link_or_id)
        .ok_or_else(|| DomainError::Validation(INVALID_TRACKING_INPUT_MESSAGE.to_owned()))?;

    let record = stories
        .fetch_story(&story_id)
        .await?
        .ok_or_else(|| DomainError::StoryNotFound(story_id.clone()))?;
    let story = Story::from_value(&record.data);

    if command.passcode.trim() != story.passcode {
        debug!(story_id = %story_id, "tracking passcode rejected");
        return Err(DomainError::InvalidPasscode);
    }

    let responses = responses.list_responses(Some(&story_id)).await?;
    Ok(TrackedStory {
        story_id,
        partner_name: story.partner_name,
        responses,
    })
}
