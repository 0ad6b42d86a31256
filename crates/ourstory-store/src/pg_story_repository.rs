//! `PostgreSQL` implementation of the `StoryRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use ourstory_core::error::DomainError;
use ourstory_core::repository::{StoredStory, StoryRepository};

use crate::infrastructure;

#[derive(Debug, FromRow)]
struct StoryRow {
    id: String,
    data: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl From<StoryRow> for StoredStory {
    fn from(row: StoryRow) -> Self {
        Self {
            id: row.id,
            data: row.data.0,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed story repository.
#[derive(Debug, Clone)]
pub struct PgStoryRepository {
    pool: PgPool,
}

impl PgStoryRepository {
    /// Creates a new `PgStoryRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    async fn fetch_story(&self, id: &str) -> Result<Option<StoredStory>, DomainError> {
        let row = sqlx::query_as::<_, StoryRow>(
            "SELECT id, data, created_at FROM stories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure("failed to fetch story", &e))?;
        Ok(row.map(StoredStory::from))
    }

    async fn insert_story(
        &self,
        data: &serde_json::Value,
        custom_id: Option<&str>,
    ) -> Result<StoredStory, DomainError> {
        let id = custom_id.map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

        let row = sqlx::query_as::<_, StoryRow>(
            "INSERT INTO stories (id, data) VALUES ($1, $2) RETURNING id, data, created_at",
        )
        .bind(&id)
        .bind(Json(data))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DomainError::DuplicateId(id.clone())
            }
            other => infrastructure("failed to insert story", &other),
        })?;

        debug!(story_id = %row.id, "story inserted");
        Ok(row.into())
    }
}
