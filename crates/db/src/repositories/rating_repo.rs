//! Repository for the `rating_votes` table -- the rating store.
//!
//! Mutation discipline: one atomic upsert per submission, keyed on the
//! UNIQUE (clip_id, user_id) pair. Concurrent submissions for the same
//! pair serialize on that constraint; submissions for different pairs
//! never contend. Reads assemble tallies from rows in a single
//! statement, which in Postgres is a consistent snapshot.

use std::collections::HashMap;

use clipsesh_core::rating::{RatingCategory, RatingTally};
use clipsesh_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{assemble_tallies, RatingVoteRow};

const COLUMNS: &str = "clip_id, user_id, username, category, voted_at";

/// Provides vote mutation and tally reads.
pub struct RatingRepo;

impl RatingRepo {
    /// Upsert a vote with single-category exclusivity.
    ///
    /// Replaces any prior vote by the same user on the same clip. The
    /// conditional `DO UPDATE` leaves `voted_at` untouched on a
    /// same-category resubmission, making it a true no-op.
    pub async fn submit(
        pool: &PgPool,
        clip_id: DbId,
        user_id: DbId,
        username: &str,
        category: RatingCategory,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO rating_votes (clip_id, user_id, username, category)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (clip_id, user_id) DO UPDATE
                SET category = EXCLUDED.category,
                    username = EXCLUDED.username,
                    voted_at = now()
              WHERE rating_votes.category IS DISTINCT FROM EXCLUDED.category",
        )
        .bind(clip_id)
        .bind(user_id)
        .bind(username)
        .bind(category.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Withdraw a user's vote on a clip, whatever its category.
    ///
    /// Returns true when a vote was removed.
    pub async fn remove(pool: &PgPool, clip_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rating_votes WHERE clip_id = $1 AND user_id = $2")
            .bind(clip_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Snapshot the tally for one clip. A clip with no votes yields an
    /// empty tally, not an error.
    pub async fn tally(pool: &PgPool, clip_id: DbId) -> Result<RatingTally, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rating_votes WHERE clip_id = $1");
        let rows = sqlx::query_as::<_, RatingVoteRow>(&query)
            .bind(clip_id)
            .fetch_all(pool)
            .await?;
        Ok(assemble_tallies(rows).remove(&clip_id).unwrap_or_default())
    }

    /// Snapshot tallies for a batch of clips in one round trip.
    ///
    /// Clips without votes are simply absent from the map.
    pub async fn tallies(
        pool: &PgPool,
        clip_ids: &[DbId],
    ) -> Result<HashMap<DbId, RatingTally>, sqlx::Error> {
        if clip_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("SELECT {COLUMNS} FROM rating_votes WHERE clip_id = ANY($1)");
        let rows = sqlx::query_as::<_, RatingVoteRow>(&query)
            .bind(clip_ids)
            .fetch_all(pool)
            .await?;
        Ok(assemble_tallies(rows))
    }

    /// Snapshot every tally in the store. Used by season processing,
    /// where the single SELECT doubles as the consistency guarantee.
    pub async fn all_tallies(pool: &PgPool) -> Result<HashMap<DbId, RatingTally>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rating_votes");
        let rows = sqlx::query_as::<_, RatingVoteRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(assemble_tallies(rows))
    }
}
