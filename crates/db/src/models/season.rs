//! Season bookkeeping model.
//!
//! Seasons are derived from the calendar (`clipsesh_core::season`); the
//! `seasons` table only tracks per-season bookkeeping: how many clips
//! were packaged and whether the season is still open.

use clipsesh_core::season::{Season, SeasonName};
use clipsesh_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `seasons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRow {
    pub id: DbId,
    /// Season label: `Spring`, `Summer`, `Fall` or `Winter`.
    pub name: String,
    pub year: i32,
    pub clip_amount: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SeasonRow {
    /// The core season value for this row, if the label is well-formed.
    pub fn season(&self) -> Option<Season> {
        let name = match self.name.as_str() {
            "Spring" => SeasonName::Spring,
            "Summer" => SeasonName::Summer,
            "Fall" => SeasonName::Fall,
            "Winter" => SeasonName::Winter,
            _ => return None,
        };
        Some(Season {
            name,
            year: self.year,
        })
    }
}
