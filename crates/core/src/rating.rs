//! Rating categories and per-clip vote tallies.
//!
//! A tally maps each category to the set of team members who voted for
//! it. The exclusivity invariant is central: a given user appears in at
//! most one category per clip. The persistent store enforces this with a
//! unique constraint; [`RatingTally::apply`] implements the same upsert
//! semantics for in-memory use and for tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// A rating category on the 1-4 scale, or a deny vote.
///
/// Category `1` is the *highest*-value rating: the numeric label is a
/// rank position, not a magnitude. `Deny` signals the clip should be
/// excluded from publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingCategory {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    Deny,
}

/// Categories in rank order, best first. Majority-vote tie-breaking and
/// tally iteration both rely on this explicit ordering -- never on map
/// iteration order.
pub const CATEGORY_ORDER: [RatingCategory; 5] = [
    RatingCategory::One,
    RatingCategory::Two,
    RatingCategory::Three,
    RatingCategory::Four,
    RatingCategory::Deny,
];

impl RatingCategory {
    /// The wire/storage label for this category (`"1"`..`"4"`, `"deny"`).
    pub fn as_str(self) -> &'static str {
        match self {
            RatingCategory::One => "1",
            RatingCategory::Two => "2",
            RatingCategory::Three => "3",
            RatingCategory::Four => "4",
            RatingCategory::Deny => "deny",
        }
    }

    /// Parse a category label. Unknown labels are rejected here rather
    /// than silently creating new tally buckets.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        match label {
            "1" => Ok(RatingCategory::One),
            "2" => Ok(RatingCategory::Two),
            "3" => Ok(RatingCategory::Three),
            "4" => Ok(RatingCategory::Four),
            "deny" => Ok(RatingCategory::Deny),
            other => Err(CoreError::InvalidCategory(format!(
                "'{other}' is not a valid category (expected 1, 2, 3, 4 or deny)"
            ))),
        }
    }

    /// Numeric value for averaging; `None` for deny.
    pub fn numeric_value(self) -> Option<u32> {
        match self {
            RatingCategory::One => Some(1),
            RatingCategory::Two => Some(2),
            RatingCategory::Three => Some(3),
            RatingCategory::Four => Some(4),
            RatingCategory::Deny => None,
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One team member's vote inside a tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRecord {
    pub user_id: DbId,
    pub username: String,
    pub voted_at: Timestamp,
}

/// Per-clip vote tally: one voter list per category.
///
/// Invariant: a `user_id` appears in at most one category's voter list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingTally {
    pub ones: Vec<VoterRecord>,
    pub twos: Vec<VoterRecord>,
    pub threes: Vec<VoterRecord>,
    pub fours: Vec<VoterRecord>,
    pub denies: Vec<VoterRecord>,
}

impl RatingTally {
    /// The voter list for a category.
    pub fn voters(&self, category: RatingCategory) -> &[VoterRecord] {
        match category {
            RatingCategory::One => &self.ones,
            RatingCategory::Two => &self.twos,
            RatingCategory::Three => &self.threes,
            RatingCategory::Four => &self.fours,
            RatingCategory::Deny => &self.denies,
        }
    }

    fn voters_mut(&mut self, category: RatingCategory) -> &mut Vec<VoterRecord> {
        match category {
            RatingCategory::One => &mut self.ones,
            RatingCategory::Two => &mut self.twos,
            RatingCategory::Three => &mut self.threes,
            RatingCategory::Four => &mut self.fours,
            RatingCategory::Deny => &mut self.denies,
        }
    }

    /// Number of votes in a category.
    pub fn count(&self, category: RatingCategory) -> usize {
        self.voters(category).len()
    }

    /// Total votes across all categories, deny included.
    pub fn total(&self) -> usize {
        CATEGORY_ORDER.iter().map(|&c| self.count(c)).sum()
    }

    /// Number of deny votes.
    pub fn deny_count(&self) -> usize {
        self.denies.len()
    }

    /// True when no votes exist in any category.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The category a user currently holds a vote in, if any.
    pub fn category_of(&self, user_id: DbId) -> Option<RatingCategory> {
        CATEGORY_ORDER
            .into_iter()
            .find(|&c| self.voters(c).iter().any(|v| v.user_id == user_id))
    }

    /// Upsert a vote with single-category exclusivity.
    ///
    /// Any prior vote by the same user in a *different* category is
    /// removed before the new one is added. Re-applying the same category
    /// is idempotent: counts do not change (the existing `voted_at` is
    /// kept).
    pub fn apply(&mut self, category: RatingCategory, voter: VoterRecord) {
        match self.category_of(voter.user_id) {
            Some(existing) if existing == category => {}
            Some(existing) => {
                self.voters_mut(existing).retain(|v| v.user_id != voter.user_id);
                self.voters_mut(category).push(voter);
            }
            None => self.voters_mut(category).push(voter),
        }
    }

    /// Remove a user's vote from whichever category holds it.
    ///
    /// Returns true when a vote was removed.
    pub fn remove(&mut self, user_id: DbId) -> bool {
        match self.category_of(user_id) {
            Some(category) => {
                self.voters_mut(category).retain(|v| v.user_id != user_id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn voter(user_id: DbId) -> VoterRecord {
        VoterRecord {
            user_id,
            username: format!("user{user_id}"),
            voted_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_all_valid_labels() {
        assert_eq!(RatingCategory::parse("1").unwrap(), RatingCategory::One);
        assert_eq!(RatingCategory::parse("4").unwrap(), RatingCategory::Four);
        assert_eq!(RatingCategory::parse("deny").unwrap(), RatingCategory::Deny);
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert_matches!(
            RatingCategory::parse("5"),
            Err(CoreError::InvalidCategory(_))
        );
        assert_matches!(
            RatingCategory::parse(""),
            Err(CoreError::InvalidCategory(_))
        );
        assert_matches!(
            RatingCategory::parse("Deny"),
            Err(CoreError::InvalidCategory(_))
        );
    }

    #[test]
    fn test_label_round_trip() {
        for category in CATEGORY_ORDER {
            assert_eq!(RatingCategory::parse(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn test_apply_records_vote() {
        let mut tally = RatingTally::default();
        tally.apply(RatingCategory::Two, voter(7));

        assert_eq!(tally.count(RatingCategory::Two), 1);
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.category_of(7), Some(RatingCategory::Two));
    }

    #[test]
    fn test_apply_moves_vote_between_categories() {
        let mut tally = RatingTally::default();
        tally.apply(RatingCategory::One, voter(7));
        tally.apply(RatingCategory::Deny, voter(7));

        assert_eq!(tally.count(RatingCategory::One), 0);
        assert_eq!(tally.deny_count(), 1);
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.category_of(7), Some(RatingCategory::Deny));
    }

    #[test]
    fn test_apply_same_category_is_idempotent() {
        let mut tally = RatingTally::default();
        tally.apply(RatingCategory::Three, voter(7));
        tally.apply(RatingCategory::Three, voter(7));
        tally.apply(RatingCategory::Three, voter(7));

        assert_eq!(tally.count(RatingCategory::Three), 1);
        assert_eq!(tally.total(), 1);
    }

    #[test]
    fn test_exclusivity_over_arbitrary_sequence() {
        let mut tally = RatingTally::default();
        let sequence = [
            RatingCategory::One,
            RatingCategory::Deny,
            RatingCategory::Deny,
            RatingCategory::Four,
            RatingCategory::One,
            RatingCategory::Two,
        ];
        for category in sequence {
            tally.apply(category, voter(7));
        }

        // Exactly one vote survives, in the last-applied category.
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.category_of(7), Some(RatingCategory::Two));
    }

    #[test]
    fn test_votes_from_different_users_are_independent() {
        let mut tally = RatingTally::default();
        tally.apply(RatingCategory::One, voter(1));
        tally.apply(RatingCategory::One, voter(2));
        tally.apply(RatingCategory::Deny, voter(3));

        assert_eq!(tally.count(RatingCategory::One), 2);
        assert_eq!(tally.deny_count(), 1);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_remove_clears_vote() {
        let mut tally = RatingTally::default();
        tally.apply(RatingCategory::Two, voter(7));

        assert!(tally.remove(7));
        assert!(tally.is_empty());
        assert_eq!(tally.category_of(7), None);

        // Removing again is a no-op.
        assert!(!tally.remove(7));
    }
}
