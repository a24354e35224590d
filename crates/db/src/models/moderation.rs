//! Moderation config storage model.

use clipsesh_core::moderation::ModerationConfig;
use clipsesh_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// The single row of the `moderation_config` table.
#[derive(Debug, Clone, FromRow)]
pub struct ModerationConfigRow {
    pub id: DbId,
    pub deny_threshold: i64,
    pub updated_at: Timestamp,
}

impl From<ModerationConfigRow> for ModerationConfig {
    fn from(row: ModerationConfigRow) -> Self {
        ModerationConfig {
            deny_threshold: row.deny_threshold,
        }
    }
}
