//! Repository for the `moderation_config` table.
//!
//! A single-row table. Readers load it on every policy evaluation so a
//! threshold change takes effect immediately; nothing caches it.

use clipsesh_core::moderation::ModerationConfig;
use sqlx::PgPool;

use crate::models::moderation::ModerationConfigRow;

const COLUMNS: &str = "id, deny_threshold, updated_at";

/// Provides moderation config access.
pub struct ConfigRepo;

impl ConfigRepo {
    /// Load the current config, creating the default row on first use.
    pub async fn get(pool: &PgPool) -> Result<ModerationConfig, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM moderation_config ORDER BY id LIMIT 1");
        if let Some(row) = sqlx::query_as::<_, ModerationConfigRow>(&query)
            .fetch_optional(pool)
            .await?
        {
            return Ok(row.into());
        }

        let insert = format!(
            "INSERT INTO moderation_config (deny_threshold)
             VALUES ($1)
             ON CONFLICT DO NOTHING
             RETURNING {COLUMNS}"
        );
        let default = ModerationConfig::default();
        match sqlx::query_as::<_, ModerationConfigRow>(&insert)
            .bind(default.deny_threshold)
            .fetch_optional(pool)
            .await?
        {
            Some(row) => Ok(row.into()),
            // Lost the insert race; the winner's row is now present.
            None => Ok(default),
        }
    }

    /// Replace the config. Callers validate via
    /// [`ModerationConfig::validate`] before writing.
    pub async fn set(pool: &PgPool, config: &ModerationConfig) -> Result<(), sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE moderation_config SET deny_threshold = $1, updated_at = now()",
        )
        .bind(config.deny_threshold)
        .execute(pool)
        .await?;

        if updated.rows_affected() == 0 {
            sqlx::query("INSERT INTO moderation_config (deny_threshold) VALUES ($1)")
                .bind(config.deny_threshold)
                .execute(pool)
                .await?;
        }
        Ok(())
    }
}
