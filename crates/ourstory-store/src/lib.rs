//! PostgreSQL-backed store for stories and proposal responses.

pub mod pg_response_repository;
pub mod pg_story_repository;

use ourstory_core::error::DomainError;
use sqlx::PgPool;
use sqlx::migrate::Migrator;

pub use pg_response_repository::PgResponseRepository;
pub use pg_story_repository::PgStoryRepository;

/// Migrations shipped with the workspace.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies any pending migrations.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DomainError::Infrastructure(format!("migration failed: {e}")))
}

pub(crate) fn infrastructure(context: &str, e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("{context}: {e}"))
}
