//! Clip models and DTOs.
//!
//! Maps to the `clips` table. Public vote counters live on the row
//! itself; the per-IP vote ledger backing them is in `ip_votes`.

use clipsesh_core::pipeline::ClipFields;
use clipsesh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `clips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: DbId,
    pub title: String,
    pub streamer: String,
    pub submitter: String,
    /// Playable media URL.
    pub url: String,
    /// Optional external source link (e.g. the original Twitch clip).
    pub link: Option<String>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub comment_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClipFields for Clip {
    fn id(&self) -> DbId {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn streamer(&self) -> &str {
        &self.streamer
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
    fn upvotes(&self) -> i64 {
        self.upvotes
    }
    fn downvotes(&self) -> i64 {
        self.downvotes
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for submitting a new clip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClip {
    pub title: String,
    pub streamer: String,
    pub submitter: String,
    pub url: String,
    pub link: Option<String>,
}

/// DTO for editing clip metadata. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClip {
    pub title: Option<String>,
    pub streamer: Option<String>,
    pub link: Option<String>,
}
