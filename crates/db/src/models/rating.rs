//! Rating vote rows and tally assembly.
//!
//! Votes are stored one row per (clip, user) -- the UNIQUE constraint on
//! that pair is what enforces single-category exclusivity at the
//! storage level. Tallies are assembled from rows on read.

use std::collections::HashMap;

use clipsesh_core::rating::{RatingCategory, RatingTally, VoterRecord};
use clipsesh_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `rating_votes` table.
#[derive(Debug, Clone, FromRow)]
pub struct RatingVoteRow {
    pub clip_id: DbId,
    pub user_id: DbId,
    pub username: String,
    /// Category label, constrained to `1`..`4` or `deny` by a CHECK.
    pub category: String,
    pub voted_at: Timestamp,
}

/// Group vote rows into per-clip tallies.
///
/// Rows with a label outside the closed category set cannot exist under
/// the CHECK constraint; if one ever appears it is skipped and logged
/// rather than invented into a new bucket.
pub fn assemble_tallies(rows: Vec<RatingVoteRow>) -> HashMap<DbId, RatingTally> {
    let mut tallies: HashMap<DbId, RatingTally> = HashMap::new();
    for row in rows {
        let category = match RatingCategory::parse(&row.category) {
            Ok(category) => category,
            Err(_) => {
                tracing::warn!(
                    clip_id = row.clip_id,
                    category = %row.category,
                    "Skipping vote row with unknown category label"
                );
                continue;
            }
        };
        tallies.entry(row.clip_id).or_default().apply(
            category,
            VoterRecord {
                user_id: row.user_id,
                username: row.username,
                voted_at: row.voted_at,
            },
        );
    }
    tallies
}
