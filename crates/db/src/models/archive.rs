//! Season archive metadata models.
//!
//! Archives are immutable once recorded. The zip bytes themselves live
//! in external storage; this table holds metadata only.

use clipsesh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `season_archives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonArchive {
    pub id: DbId,
    /// Season label: `Spring`, `Summer`, `Fall` or `Winter`.
    pub season: String,
    pub year: i32,
    /// Archive file name, e.g. `2026-fall-clips.zip`.
    pub name: String,
    /// Download location in external storage.
    pub file_url: String,
    /// Archive size in bytes.
    pub size: i64,
    pub clip_amount: i64,
    pub created_at: Timestamp,
}

/// DTO for recording a completed archive upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonArchive {
    pub season: String,
    pub year: i32,
    pub name: String,
    pub file_url: String,
    pub size: i64,
    pub clip_amount: i64,
}
