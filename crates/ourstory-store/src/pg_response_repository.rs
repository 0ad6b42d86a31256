//! `PostgreSQL` implementation of the `ResponseRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use ourstory_core::error::DomainError;
use ourstory_core::repository::{NewResponse, ResponseRepository, StoredResponse};

use crate::infrastructure;

#[derive(Debug, FromRow)]
struct ResponseRow {
    id: Uuid,
    story_id: Option<String>,
    name: String,
    response: String,
    created_at: DateTime<Utc>,
}

impl From<ResponseRow> for StoredResponse {
    fn from(row: ResponseRow) -> Self {
        Self {
            id: row.id,
            story_id: row.story_id,
            name: row.name,
            response: row.response,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed response repository.
#[derive(Debug, Clone)]
pub struct PgResponseRepository {
    pool: PgPool,
}

impl PgResponseRepository {
    /// Creates a new `PgResponseRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PgResponseRepository {
    async fn record_response(&self, response: NewResponse) -> Result<StoredResponse, DomainError> {
        let row = sqlx::query_as::<_, ResponseRow>(
            "INSERT INTO responses (id, story_id, name, response, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, story_id, name, response, created_at",
        )
        .bind(response.id)
        .bind(response.story_id)
        .bind(response.name)
        .bind(response.response)
        .bind(response.recorded_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| infrastructure("failed to record response", &e))?;
        Ok(row.into())
    }

    async fn list_responses(
        &self,
        story_id: Option<&str>,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        let rows = sqlx::query_as::<_, ResponseRow>(
            "SELECT id, story_id, name, response, created_at FROM responses \
             WHERE $1::TEXT IS NULL OR story_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(story_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infrastructure("failed to list responses", &e))?;
        Ok(rows.into_iter().map(StoredResponse::from).collect())
    }
}
