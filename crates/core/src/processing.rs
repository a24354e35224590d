//! Season processing: select eligible clips and assemble a package
//! request at season close.
//!
//! The processor is pure and re-runnable: given the same clip set,
//! tallies, and config it always produces the same package. It only
//! *emits* the packaging request; writing the archive and updating
//! season bookkeeping belong to the persistence layer.

use std::collections::HashMap;

use serde::Serialize;

use crate::moderation::{is_denied, ModerationConfig};
use crate::pipeline::ClipFields;
use crate::rating::{RatingCategory, RatingTally, CATEGORY_ORDER};
use crate::season::Season;
use crate::types::DbId;

/// An eligible clip annotated with its final category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagedClip {
    pub clip_id: DbId,
    pub title: String,
    pub streamer: String,
    pub final_category: RatingCategory,
}

/// The packaging request handed to archive storage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonPackageRequest {
    pub season: Season,
    pub clips: Vec<PackagedClip>,
    pub clip_amount: usize,
}

/// Result of a processing run: the package plus the clips left out and
/// why. An `unrated` entry is a warning, not an error -- the package is
/// still produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    pub package: SeasonPackageRequest,
    /// Clips excluded because they met the deny threshold.
    pub denied: Vec<DbId>,
    /// Clips with an empty tally. Never packaged: an unrated clip must
    /// not be auto-accepted into the archive.
    pub unrated: Vec<DbId>,
}

/// The category with the most voter entries, ties broken by rank order
/// (1 beats 2 beats ... beats deny). `None` for an empty tally.
pub fn majority_category(tally: &RatingTally) -> Option<RatingCategory> {
    if tally.is_empty() {
        return None;
    }
    // CATEGORY_ORDER scan + strict greater-than keeps the earliest (best
    // ranked) category on ties, independent of any container order.
    let mut best = CATEGORY_ORDER[0];
    let mut best_count = tally.count(best);
    for &category in &CATEGORY_ORDER[1..] {
        let count = tally.count(category);
        if count > best_count {
            best = category;
            best_count = count;
        }
    }
    Some(best)
}

/// Partition the clip set and build the package request for a season.
///
/// A clip lands in exactly one bucket: `denied` when its tally meets the
/// deny threshold, `unrated` when its tally is empty or missing, else the
/// package with its majority category. Denial is checked first, so a
/// clip can never be both.
pub fn process_season<T: ClipFields>(
    clips: &[T],
    tallies: &HashMap<DbId, RatingTally>,
    config: &ModerationConfig,
    season: Season,
) -> ProcessOutcome {
    let empty = RatingTally::default();

    let mut packaged = Vec::new();
    let mut denied = Vec::new();
    let mut unrated = Vec::new();

    for clip in clips {
        let tally = tallies.get(&clip.id()).unwrap_or(&empty);

        if is_denied(tally, config) {
            denied.push(clip.id());
            continue;
        }

        match majority_category(tally) {
            Some(final_category) => packaged.push(PackagedClip {
                clip_id: clip.id(),
                title: clip.title().to_string(),
                streamer: clip.streamer().to_string(),
                final_category,
            }),
            None => unrated.push(clip.id()),
        }
    }

    let clip_amount = packaged.len();
    ProcessOutcome {
        package: SeasonPackageRequest {
            season,
            clips: packaged,
            clip_amount,
        },
        denied,
        unrated,
    }
}
