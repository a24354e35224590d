//! Ranking score and average rating derived from a tally.
//!
//! The weight table is a hand-tuned policy choice carried over from the
//! original rating scheme: category 1 is the best rating and deny is a
//! negative signal. It is a configurable table rather than hard-coded
//! constants; [`ScoreWeights::default`] is the production policy.

use serde::{Deserialize, Serialize};

use crate::rating::{RatingCategory, RatingTally, CATEGORY_ORDER};

/// Per-category weights for the ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub one: i64,
    pub two: i64,
    pub three: i64,
    pub four: i64,
    pub deny: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            one: 10,
            two: 6,
            three: 4,
            four: 2,
            deny: -5,
        }
    }
}

impl ScoreWeights {
    fn weight(&self, category: RatingCategory) -> i64 {
        match category {
            RatingCategory::One => self.one,
            RatingCategory::Two => self.two,
            RatingCategory::Three => self.three,
            RatingCategory::Four => self.four,
            RatingCategory::Deny => self.deny,
        }
    }
}

/// Linear combination of category counts under the weight table.
pub fn weighted_score(tally: &RatingTally, weights: &ScoreWeights) -> i64 {
    CATEGORY_ORDER
        .into_iter()
        .map(|c| weights.weight(c) * tally.count(c) as i64)
        .sum()
}

/// Arithmetic mean of the numeric category values, weighted by counts.
///
/// Deny votes are excluded from both numerator and denominator. Returns
/// `None` when no numeric votes exist -- a zero would be
/// indistinguishable from a genuine floor rating, so the API serializes
/// the absence as an `"N/A"` sentinel instead.
pub fn average_rating(tally: &RatingTally) -> Option<f64> {
    let mut sum = 0u64;
    let mut count = 0u64;
    for category in CATEGORY_ORDER {
        if let Some(value) = category.numeric_value() {
            let n = tally.count(category) as u64;
            sum += u64::from(value) * n;
            count += n;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::VoterRecord;
    use chrono::Utc;

    fn tally(counts: &[(RatingCategory, i64)]) -> RatingTally {
        let mut tally = RatingTally::default();
        let mut next_user = 0;
        for &(category, n) in counts {
            for _ in 0..n {
                tally.apply(
                    category,
                    VoterRecord {
                        user_id: next_user,
                        username: format!("user{next_user}"),
                        voted_at: Utc::now(),
                    },
                );
                next_user += 1;
            }
        }
        tally
    }

    #[test]
    fn test_default_weights_match_policy() {
        let w = ScoreWeights::default();
        assert_eq!((w.one, w.two, w.three, w.four, w.deny), (10, 6, 4, 2, -5));
    }

    #[test]
    fn test_weighted_score_combination() {
        let t = tally(&[
            (RatingCategory::One, 2),
            (RatingCategory::Two, 1),
            (RatingCategory::Four, 3),
            (RatingCategory::Deny, 1),
        ]);
        // 2*10 + 1*6 + 3*2 - 1*5
        assert_eq!(weighted_score(&t, &ScoreWeights::default()), 27);
    }

    #[test]
    fn test_only_denies_scores_strictly_negative() {
        let t = tally(&[(RatingCategory::Deny, 3)]);
        assert!(weighted_score(&t, &ScoreWeights::default()) < 0);
    }

    #[test]
    fn test_only_ones_scores_strictly_positive() {
        let t = tally(&[(RatingCategory::One, 1)]);
        assert!(weighted_score(&t, &ScoreWeights::default()) > 0);
    }

    #[test]
    fn test_empty_tally_scores_zero() {
        assert_eq!(
            weighted_score(&RatingTally::default(), &ScoreWeights::default()),
            0
        );
    }

    #[test]
    fn test_custom_weights_override_policy() {
        let flat = ScoreWeights {
            one: 1,
            two: 1,
            three: 1,
            four: 1,
            deny: 0,
        };
        let t = tally(&[(RatingCategory::One, 2), (RatingCategory::Deny, 9)]);
        assert_eq!(weighted_score(&t, &flat), 2);
    }

    #[test]
    fn test_average_excludes_denies() {
        let t = tally(&[(RatingCategory::One, 2), (RatingCategory::Deny, 100)]);
        assert_eq!(average_rating(&t), Some(1.0));
    }

    #[test]
    fn test_average_weighted_by_counts() {
        let t = tally(&[(RatingCategory::Two, 1), (RatingCategory::Four, 3)]);
        // (2 + 4*3) / 4
        assert_eq!(average_rating(&t), Some(3.5));
    }

    #[test]
    fn test_average_none_without_numeric_votes() {
        assert_eq!(average_rating(&RatingTally::default()), None);
        let t = tally(&[(RatingCategory::Deny, 4)]);
        assert_eq!(average_rating(&t), None);
    }
}
