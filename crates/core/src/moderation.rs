//! Moderation policy: when does a clip count as denied?
//!
//! The policy is a pure function over a tally and the current config so
//! it can run on every read path without caching staleness. Callers load
//! the config from the config store per evaluation, never from process
//! state.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rating::RatingTally;

/// Fallback deny threshold used when no config row exists yet.
pub const DEFAULT_DENY_THRESHOLD: i64 = 5;

/// Administrator-controlled moderation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationConfig {
    /// Minimum number of distinct deny voters required to mark a clip
    /// denied. Must be at least 1.
    pub deny_threshold: i64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            deny_threshold: DEFAULT_DENY_THRESHOLD,
        }
    }
}

impl ModerationConfig {
    /// Reject non-positive thresholds before they reach the config store.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.deny_threshold < 1 {
            return Err(CoreError::InvalidConfig(format!(
                "denyThreshold must be at least 1, got {}",
                self.deny_threshold
            )));
        }
        Ok(())
    }
}

/// Whether a clip is denied under the given config.
pub fn is_denied(tally: &RatingTally, config: &ModerationConfig) -> bool {
    tally.deny_count() as i64 >= config.deny_threshold
}
