//! Repository for public upvotes/downvotes.
//!
//! One vote per hashed client IP per clip, tracked in `ip_votes`.
//! Casting the opposite side moves the vote; repeating the same side
//! withdraws it. The clip's counters are adjusted in the same
//! transaction as the ledger row so they can never drift.

use clipsesh_core::types::DbId;
use sqlx::PgPool;

/// Direction of a public vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }

    fn counter_column(self) -> &'static str {
        match self {
            VoteDirection::Up => "upvotes",
            VoteDirection::Down => "downvotes",
        }
    }
}

/// Outcome of a cast, for the response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded,
    Switched,
    Withdrawn,
}

/// Provides public vote operations.
pub struct VoteRepo;

impl VoteRepo {
    /// Cast, switch, or withdraw a public vote for the given voter hash.
    pub async fn cast(
        pool: &PgPool,
        clip_id: DbId,
        ip_hash: &str,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<(String,)> = sqlx::query_as(
            "SELECT vote FROM ip_votes WHERE clip_id = $1 AND ip_hash = $2 FOR UPDATE",
        )
        .bind(clip_id)
        .bind(ip_hash)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match existing {
            None => {
                sqlx::query("INSERT INTO ip_votes (clip_id, ip_hash, vote) VALUES ($1, $2, $3)")
                    .bind(clip_id)
                    .bind(ip_hash)
                    .bind(direction.as_str())
                    .execute(&mut *tx)
                    .await?;
                Self::bump(&mut tx, clip_id, direction, 1).await?;
                VoteOutcome::Recorded
            }
            Some((vote,)) if vote == direction.as_str() => {
                sqlx::query("DELETE FROM ip_votes WHERE clip_id = $1 AND ip_hash = $2")
                    .bind(clip_id)
                    .bind(ip_hash)
                    .execute(&mut *tx)
                    .await?;
                Self::bump(&mut tx, clip_id, direction, -1).await?;
                VoteOutcome::Withdrawn
            }
            Some(_) => {
                let opposite = match direction {
                    VoteDirection::Up => VoteDirection::Down,
                    VoteDirection::Down => VoteDirection::Up,
                };
                sqlx::query("UPDATE ip_votes SET vote = $3 WHERE clip_id = $1 AND ip_hash = $2")
                    .bind(clip_id)
                    .bind(ip_hash)
                    .bind(direction.as_str())
                    .execute(&mut *tx)
                    .await?;
                Self::bump(&mut tx, clip_id, opposite, -1).await?;
                Self::bump(&mut tx, clip_id, direction, 1).await?;
                VoteOutcome::Switched
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn bump(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        clip_id: DbId,
        direction: VoteDirection,
        delta: i64,
    ) -> Result<(), sqlx::Error> {
        // Column name comes from a closed enum, never from input.
        let column = direction.counter_column();
        let query =
            format!("UPDATE clips SET {column} = GREATEST({column} + $2, 0) WHERE id = $1");
        sqlx::query(&query)
            .bind(clip_id)
            .bind(delta)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
