//! Clip query pipeline: filter, sort, paginate.
//!
//! Operates over the clip+tally join entirely in memory: callers load
//! the candidate clips and batch-load their tallies in one round trip
//! each, then run the pipeline. All stages are pure and deterministic --
//! every sort ends with an id tie-break so page boundaries are stable
//! across requests.
//!
//! The pipeline is generic over [`ClipFields`] so it can be exercised
//! without the persistence layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::moderation::{is_denied, ModerationConfig};
use crate::rating::RatingTally;
use crate::scoring::{weighted_score, ScoreWeights};
use crate::types::{DbId, Timestamp};

/// Default number of clips per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum number of clips per page.
pub const MAX_PAGE_SIZE: usize = 100;

/// The clip attributes the pipeline reads. Implemented by the db-layer
/// clip model and by test fixtures.
pub trait ClipFields {
    fn id(&self) -> DbId;
    fn title(&self) -> &str;
    fn streamer(&self) -> &str;
    fn created_at(&self) -> Timestamp;
    fn upvotes(&self) -> i64;
    fn downvotes(&self) -> i64;
}

/// Available sort orders for clip listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Newest,
    Oldest,
    MostUpvoted,
    MostDownvoted,
    BestRatio,
    WorstRatio,
    HighestScore,
    LowestScore,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Newest
    }
}

impl SortKey {
    /// Score sorts rank by internal team ratings and are restricted to
    /// team roles.
    pub fn requires_team_role(self) -> bool {
        matches!(self, SortKey::HighestScore | SortKey::LowestScore)
    }
}

/// Query parameters after request validation.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    pub sort: SortKey,
    /// Case-insensitive substring match over title and streamer.
    pub search: Option<String>,
    /// Exact streamer match.
    pub streamer: Option<String>,
    /// Omit clips this user has already voted on in any category.
    pub exclude_rated_by: Option<DbId>,
    /// Whether denied clips stay visible (team/admin only).
    pub include_denied: bool,
}

/// One page of query results with post-filter totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage<T> {
    pub clips: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

/// Public vote ratio. The divisor floor keeps a clip with zero downvotes
/// at a finite ratio.
pub fn vote_ratio(upvotes: i64, downvotes: i64) -> f64 {
    upvotes as f64 / downvotes.max(1) as f64
}

/// Drop clips that fail the filter set. Denial filtering evaluates the
/// current config against each clip's tally; clips without a tally are
/// never denied.
pub fn filter_clips<T: ClipFields>(
    clips: Vec<T>,
    params: &QueryParams,
    tallies: &HashMap<DbId, RatingTally>,
    config: &ModerationConfig,
) -> Vec<T> {
    let search = params.search.as_deref().map(str::to_lowercase);

    clips
        .into_iter()
        .filter(|clip| {
            if let Some(needle) = &search {
                let matches = clip.title().to_lowercase().contains(needle)
                    || clip.streamer().to_lowercase().contains(needle);
                if !matches {
                    return false;
                }
            }
            if let Some(streamer) = params.streamer.as_deref() {
                if clip.streamer() != streamer {
                    return false;
                }
            }
            if let Some(user_id) = params.exclude_rated_by {
                if let Some(tally) = tallies.get(&clip.id()) {
                    if tally.category_of(user_id).is_some() {
                        return false;
                    }
                }
            }
            if !params.include_denied {
                if let Some(tally) = tallies.get(&clip.id()) {
                    if is_denied(tally, config) {
                        return false;
                    }
                }
            }
            true
        })
        .collect()
}

/// Sort clips in place. Score sorts read the batch-loaded tallies; a
/// missing tally scores as all-zero counts.
pub fn sort_clips<T: ClipFields>(
    clips: &mut [T],
    sort: SortKey,
    tallies: &HashMap<DbId, RatingTally>,
    weights: &ScoreWeights,
) {
    let score_of = |clip: &T| {
        tallies
            .get(&clip.id())
            .map(|t| weighted_score(t, weights))
            .unwrap_or(0)
    };

    match sort {
        SortKey::Newest => {
            clips.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then(b.id().cmp(&a.id()))
            });
        }
        SortKey::Oldest => {
            clips.sort_by(|a, b| {
                a.created_at()
                    .cmp(&b.created_at())
                    .then(a.id().cmp(&b.id()))
            });
        }
        SortKey::MostUpvoted => {
            clips.sort_by(|a, b| b.upvotes().cmp(&a.upvotes()).then(a.id().cmp(&b.id())));
        }
        SortKey::MostDownvoted => {
            clips.sort_by(|a, b| b.downvotes().cmp(&a.downvotes()).then(a.id().cmp(&b.id())));
        }
        SortKey::BestRatio => {
            clips.sort_by(|a, b| {
                vote_ratio(b.upvotes(), b.downvotes())
                    .total_cmp(&vote_ratio(a.upvotes(), a.downvotes()))
                    .then(a.id().cmp(&b.id()))
            });
        }
        SortKey::WorstRatio => {
            clips.sort_by(|a, b| {
                vote_ratio(a.upvotes(), a.downvotes())
                    .total_cmp(&vote_ratio(b.upvotes(), b.downvotes()))
                    .then(a.id().cmp(&b.id()))
            });
        }
        SortKey::HighestScore => {
            clips.sort_by(|a, b| score_of(b).cmp(&score_of(a)).then(a.id().cmp(&b.id())));
        }
        SortKey::LowestScore => {
            clips.sort_by(|a, b| score_of(a).cmp(&score_of(b)).then(a.id().cmp(&b.id())));
        }
    }
}

/// Slice out one page. Totals reflect the post-filter, pre-page set; a
/// page past the end yields an empty list rather than an error.
pub fn paginate<T>(clips: Vec<T>, page: usize, page_size: usize) -> QueryPage<T> {
    let page = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

    let total_count = clips.len();
    let total_pages = total_count.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let items = if start >= total_count {
        Vec::new()
    } else {
        clips
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect()
    };

    QueryPage {
        clips: items,
        total_count,
        total_pages,
        page,
    }
}

/// Full pipeline: filter, sort, paginate.
///
/// `exclude_rated_by` filtering happens before pagination so page
/// boundaries stay stable as the same user keeps rating.
pub fn run_query<T: ClipFields>(
    clips: Vec<T>,
    params: &QueryParams,
    tallies: &HashMap<DbId, RatingTally>,
    config: &ModerationConfig,
    weights: &ScoreWeights,
) -> QueryPage<T> {
    let mut filtered = filter_clips(clips, params, tallies, config);
    sort_clips(&mut filtered, params.sort, tallies, weights);
    paginate(filtered, params.page, params.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{RatingCategory, VoterRecord};
    use chrono::{Duration, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct TestClip {
        id: DbId,
        title: String,
        streamer: String,
        created_at: Timestamp,
        upvotes: i64,
        downvotes: i64,
    }

    impl ClipFields for TestClip {
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

    fn clip(id: DbId, title: &str, streamer: &str, upvotes: i64, downvotes: i64) -> TestClip {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        TestClip {
            id,
            title: title.to_string(),
            streamer: streamer.to_string(),
            created_at: base + Duration::hours(id),
            upvotes,
            downvotes,
        }
    }

    fn tally_of(pairs: &[(DbId, RatingCategory)]) -> RatingTally {
        let mut tally = RatingTally::default();
        for &(user_id, category) in pairs {
            tally.apply(
                category,
                VoterRecord {
                    user_id,
                    username: format!("user{user_id}"),
                    voted_at: Utc::now(),
                },
            );
        }
        tally
    }

    fn ids<T: ClipFields>(page: &QueryPage<T>) -> Vec<DbId> {
        page.clips.iter().map(|c| c.id()).collect()
    }

    fn default_params() -> QueryParams {
        QueryParams {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            ..QueryParams::default()
        }
    }

    #[test]
    fn test_search_matches_title_and_streamer_case_insensitive() {
        let clips = vec![
            clip(1, "Insane Flick", "Daumen", 0, 0),
            clip(2, "whiff compilation", "flickmaster", 0, 0),
            clip(3, "Ace round", "Someone", 0, 0),
        ];
        let params = QueryParams {
            search: Some("FLICK".to_string()),
            ..default_params()
        };
        let result = run_query(
            clips,
            &params,
            &HashMap::new(),
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(result.total_count, 2);
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_streamer_filter_is_exact() {
        let clips = vec![
            clip(1, "a", "Daumen", 0, 0),
            clip(2, "b", "DaumenTV", 0, 0),
        ];
        let params = QueryParams {
            streamer: Some("Daumen".to_string()),
            ..default_params()
        };
        let result = run_query(
            clips,
            &params,
            &HashMap::new(),
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_exclude_rated_by_user() {
        let clips = vec![clip(1, "a", "s", 0, 0), clip(2, "b", "s", 0, 0)];
        let mut tallies = HashMap::new();
        tallies.insert(1, tally_of(&[(42, RatingCategory::Three)]));

        let params = QueryParams {
            exclude_rated_by: Some(42),
            ..default_params()
        };
        let result = run_query(
            clips,
            &params,
            &tallies,
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_denied_clips_hidden_unless_included() {
        let clips = vec![clip(1, "a", "s", 0, 0), clip(2, "b", "s", 0, 0)];
        let mut tallies = HashMap::new();
        tallies.insert(
            1,
            tally_of(&[(1, RatingCategory::Deny), (2, RatingCategory::Deny)]),
        );
        let config = ModerationConfig { deny_threshold: 2 };

        let hidden = run_query(
            vec![clip(1, "a", "s", 0, 0), clip(2, "b", "s", 0, 0)],
            &default_params(),
            &tallies,
            &config,
            &ScoreWeights::default(),
        );
        assert_eq!(ids(&hidden), vec![2]);

        let params = QueryParams {
            include_denied: true,
            ..default_params()
        };
        let visible = run_query(clips, &params, &tallies, &config, &ScoreWeights::default());
        assert_eq!(visible.total_count, 2);
    }

    #[test]
    fn test_newest_and_oldest_sorts() {
        let clips = vec![clip(2, "b", "s", 0, 0), clip(1, "a", "s", 0, 0), clip(3, "c", "s", 0, 0)];
        let newest = run_query(
            clips.clone(),
            &default_params(),
            &HashMap::new(),
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(ids(&newest), vec![3, 2, 1]);

        let params = QueryParams {
            sort: SortKey::Oldest,
            ..default_params()
        };
        let oldest = run_query(
            clips,
            &params,
            &HashMap::new(),
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(ids(&oldest), vec![1, 2, 3]);
    }

    #[test]
    fn test_ratio_sort_uses_downvote_floor() {
        // 10/0 ratio floors the divisor at 1, so it beats 12/2 but not 20/1.
        let clips = vec![
            clip(1, "a", "s", 12, 2),
            clip(2, "b", "s", 10, 0),
            clip(3, "c", "s", 20, 1),
        ];
        let params = QueryParams {
            sort: SortKey::BestRatio,
            ..default_params()
        };
        let result = run_query(
            clips,
            &params,
            &HashMap::new(),
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_score_sort_reads_batch_tallies() {
        let clips = vec![clip(1, "a", "s", 0, 0), clip(2, "b", "s", 0, 0), clip(3, "c", "s", 0, 0)];
        let mut tallies = HashMap::new();
        // clip 1: one category-1 vote -> 10; clip 2: one deny -> -5; clip 3 unrated -> 0.
        tallies.insert(1, tally_of(&[(1, RatingCategory::One)]));
        tallies.insert(2, tally_of(&[(1, RatingCategory::Deny)]));

        let params = QueryParams {
            sort: SortKey::HighestScore,
            ..default_params()
        };
        let result = run_query(
            clips,
            &params,
            &tallies,
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(ids(&result), vec![1, 3, 2]);
    }

    #[test]
    fn test_pagination_pages_are_disjoint_and_ordered() {
        let clips: Vec<TestClip> = (1..=25).map(|i| clip(i, "t", "s", 0, 0)).collect();

        let page = |n: usize, size: usize| {
            let params = QueryParams {
                page: n,
                page_size: size,
                ..default_params()
            };
            run_query(
                clips.clone(),
                &params,
                &HashMap::new(),
                &ModerationConfig::default(),
                &ScoreWeights::default(),
            )
        };

        let p1 = page(1, 10);
        let p2 = page(2, 10);
        let combined = page(1, 20);

        assert_eq!(p1.total_count, 25);
        assert_eq!(p1.total_pages, 3);
        assert!(ids(&p1).iter().all(|id| !ids(&p2).contains(id)));

        let mut union = ids(&p1);
        union.extend(ids(&p2));
        assert_eq!(union, ids(&combined));
    }

    #[test]
    fn test_page_past_end_is_empty_not_error() {
        let clips: Vec<TestClip> = (1..=5).map(|i| clip(i, "t", "s", 0, 0)).collect();
        let params = QueryParams {
            page: 9,
            page_size: 10,
            ..default_params()
        };
        let result = run_query(
            clips,
            &params,
            &HashMap::new(),
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert!(result.clips.is_empty());
        assert_eq!(result.total_count, 5);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.page, 9);
    }

    #[test]
    fn test_exclusion_applies_before_pagination() {
        // Excluding rated clips must shrink the total, not just the page.
        let clips: Vec<TestClip> = (1..=12).map(|i| clip(i, "t", "s", 0, 0)).collect();
        let mut tallies = HashMap::new();
        for id in 1..=4 {
            tallies.insert(id, tally_of(&[(42, RatingCategory::Two)]));
        }
        let params = QueryParams {
            page: 1,
            page_size: 10,
            exclude_rated_by: Some(42),
            ..QueryParams::default()
        };
        let result = run_query(
            clips,
            &params,
            &tallies,
            &ModerationConfig::default(),
            &ScoreWeights::default(),
        );
        assert_eq!(result.total_count, 8);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.clips.len(), 8);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let clips: Vec<TestClip> = (1..=3).map(|i| clip(i, "t", "s", 0, 0)).collect();
        let result = paginate(clips, 1, 0);
        assert_eq!(result.clips.len(), 1);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn test_sort_key_team_gating() {
        assert!(SortKey::HighestScore.requires_team_role());
        assert!(SortKey::LowestScore.requires_team_role());
        assert!(!SortKey::Newest.requires_team_role());
        assert!(!SortKey::BestRatio.requires_team_role());
    }
}
