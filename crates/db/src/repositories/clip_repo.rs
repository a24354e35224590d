//! Repository for the `clips` table.

use clipsesh_core::types::DbId;
use sqlx::PgPool;

use crate::models::clip::{Clip, CreateClip, UpdateClip};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, streamer, submitter, url, link, upvotes, downvotes, \
     comment_count, created_at, updated_at";

/// Provides CRUD operations for clips.
pub struct ClipRepo;

impl ClipRepo {
    /// Insert a new clip, returning the created row.
    pub async fn create(pool: &PgPool, body: &CreateClip) -> Result<Clip, sqlx::Error> {
        let query = format!(
            "INSERT INTO clips (title, streamer, submitter, url, link)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clip>(&query)
            .bind(&body.title)
            .bind(&body.streamer)
            .bind(&body.submitter)
            .bind(&body.url)
            .bind(&body.link)
            .fetch_one(pool)
            .await
    }

    /// Fetch a clip by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Clip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clips WHERE id = $1");
        sqlx::query_as::<_, Clip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a clip exists. Used by the rating store to reject votes
    /// on missing clips without fetching the full row.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM clips WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List every clip, newest first.
    ///
    /// The query pipeline filters, re-sorts, and paginates in memory, so
    /// this is intentionally a single unconditional scan.
    pub async fn list(pool: &PgPool) -> Result<Vec<Clip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clips ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Clip>(&query).fetch_all(pool).await
    }

    /// Apply a partial metadata update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        body: &UpdateClip,
    ) -> Result<Option<Clip>, sqlx::Error> {
        let query = format!(
            "UPDATE clips SET
                title = COALESCE($2, title),
                streamer = COALESCE($3, streamer),
                link = COALESCE($4, link),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clip>(&query)
            .bind(id)
            .bind(&body.title)
            .bind(&body.streamer)
            .bind(&body.link)
            .fetch_optional(pool)
            .await
    }

    /// Delete a clip. Votes and ratings cascade via foreign keys.
    ///
    /// Returns true when a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clips WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
