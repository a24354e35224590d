//! Repository for the `season_archives` table.
//!
//! Archive rows are write-once: there is no update method by design.
//! Deletion exists as an explicit administrative action only.

use clipsesh_core::types::DbId;
use sqlx::PgPool;

use crate::models::archive::{CreateSeasonArchive, SeasonArchive};

const COLUMNS: &str = "id, season, year, name, file_url, size, clip_amount, created_at";

/// Provides season archive metadata storage.
pub struct ArchiveRepo;

impl ArchiveRepo {
    /// Record a completed archive, returning the created row.
    pub async fn create(
        pool: &PgPool,
        body: &CreateSeasonArchive,
    ) -> Result<SeasonArchive, sqlx::Error> {
        let query = format!(
            "INSERT INTO season_archives (season, year, name, file_url, size, clip_amount)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeasonArchive>(&query)
            .bind(&body.season)
            .bind(body.year)
            .bind(&body.name)
            .bind(&body.file_url)
            .bind(body.size)
            .bind(body.clip_amount)
            .fetch_one(pool)
            .await
    }

    /// Fetch one archive by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SeasonArchive>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM season_archives WHERE id = $1");
        sqlx::query_as::<_, SeasonArchive>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all archives, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<SeasonArchive>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM season_archives ORDER BY created_at DESC");
        sqlx::query_as::<_, SeasonArchive>(&query).fetch_all(pool).await
    }

    /// Delete an archive record. Returns true when a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM season_archives WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
