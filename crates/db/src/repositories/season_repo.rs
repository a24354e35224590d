//! Repository for the `seasons` bookkeeping table.
//!
//! Exactly one season row is active at a time. Activation is an upsert
//! keyed on (name, year) so re-running it for the current calendar
//! season is harmless.

use clipsesh_core::season::Season;
use sqlx::PgPool;

use crate::models::season::SeasonRow;

const COLUMNS: &str = "id, name, year, clip_amount, is_active, created_at, updated_at";

/// Provides season bookkeeping operations.
pub struct SeasonRepo;

impl SeasonRepo {
    /// The currently active season row, if any.
    pub async fn active(pool: &PgPool) -> Result<Option<SeasonRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons WHERE is_active LIMIT 1");
        sqlx::query_as::<_, SeasonRow>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Make the given season the single active one, creating its row if
    /// needed. Any previously active season is deactivated in the same
    /// transaction.
    pub async fn activate(pool: &PgPool, season: Season) -> Result<SeasonRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE seasons SET is_active = FALSE, updated_at = now() WHERE is_active")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO seasons (name, year, is_active)
             VALUES ($1, $2, TRUE)
             ON CONFLICT (name, year) DO UPDATE
                SET is_active = TRUE, updated_at = now()
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SeasonRow>(&query)
            .bind(season.name.as_str())
            .bind(season.year)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Record the packaged clip count after archive storage acks.
    pub async fn set_clip_amount(
        pool: &PgPool,
        season: Season,
        clip_amount: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE seasons SET clip_amount = $3, updated_at = now()
             WHERE name = $1 AND year = $2",
        )
        .bind(season.name.as_str())
        .bind(season.year)
        .bind(clip_amount)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Close out the active season. An explicit administrative action,
    /// never automatic. Returns the closed row, if one was active.
    pub async fn close_active(pool: &PgPool) -> Result<Option<SeasonRow>, sqlx::Error> {
        let query = format!(
            "UPDATE seasons SET is_active = FALSE, updated_at = now()
             WHERE is_active
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeasonRow>(&query)
            .fetch_optional(pool)
            .await
    }
}
