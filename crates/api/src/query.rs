//! Wire-level query parameter types for the clip listing endpoint.
//!
//! Axum deserializes these with `serde`, then [`ClipQuery::into_params`]
//! validates them against the caller's roles and converts to the core
//! pipeline's [`QueryParams`].

use clipsesh_core::error::CoreError;
use clipsesh_core::pipeline::{QueryParams, SortKey, DEFAULT_PAGE_SIZE};
use serde::Deserialize;

use crate::middleware::AuthUser;
use crate::error::AppError;

/// Query string parameters for `GET /api/v1/clips`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<SortKey>,
    pub search: Option<String>,
    pub streamer: Option<String>,
    /// When true, restrict results to clips the caller has not yet rated.
    pub unrated_only: Option<bool>,
    /// When true, include clips currently over the deny threshold.
    pub include_denied: Option<bool>,
}

impl ClipQuery {
    /// Validate against the caller's roles and convert to pipeline
    /// parameters.
    ///
    /// Team-only options (score sorts, denied visibility, unrated
    /// filtering) are rejected with 403 for anonymous callers and
    /// callers without a team role.
    pub fn into_params(self, user: Option<&AuthUser>) -> Result<QueryParams, AppError> {
        let sort = self.sort.unwrap_or_default();
        let is_team = user
            .map(|u| clipsesh_core::roles::is_team(&u.roles))
            .unwrap_or(false);

        if sort.requires_team_role() && !is_team {
            return Err(AppError::Core(CoreError::Forbidden(
                "Score-based sorting requires a clip team role".into(),
            )));
        }
        let include_denied = self.include_denied.unwrap_or(false);
        if include_denied && !is_team {
            return Err(AppError::Core(CoreError::Forbidden(
                "Viewing denied clips requires a clip team role".into(),
            )));
        }
        let unrated_only = self.unrated_only.unwrap_or(false);
        if unrated_only && !is_team {
            return Err(AppError::Core(CoreError::Forbidden(
                "Unrated filtering requires a clip team role".into(),
            )));
        }

        let exclude_rated_by = if unrated_only {
            user.map(|u| u.user_id)
        } else {
            None
        };

        Ok(QueryParams {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
            search: self.search.filter(|s| !s.trim().is_empty()),
            streamer: self.streamer.filter(|s| !s.trim().is_empty()),
            exclude_rated_by,
            include_denied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_user() -> AuthUser {
        AuthUser {
            user_id: 7,
            username: "carol".into(),
            roles: vec!["clipteam".into()],
        }
    }

    fn plain_user() -> AuthUser {
        AuthUser {
            user_id: 8,
            username: "dave".into(),
            roles: vec!["user".into()],
        }
    }

    #[test]
    fn anonymous_defaults_are_allowed() {
        let params = ClipQuery::default().into_params(None).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
        assert!(!params.include_denied);
        assert!(params.exclude_rated_by.is_none());
    }

    #[test]
    fn score_sort_rejected_for_anonymous() {
        let query = ClipQuery {
            sort: Some(SortKey::HighestScore),
            ..Default::default()
        };
        assert!(query.into_params(None).is_err());
    }

    #[test]
    fn score_sort_rejected_for_plain_user() {
        let query = ClipQuery {
            sort: Some(SortKey::HighestScore),
            ..Default::default()
        };
        let user = plain_user();
        assert!(query.into_params(Some(&user)).is_err());
    }

    #[test]
    fn team_user_gets_exclude_rated_by() {
        let query = ClipQuery {
            unrated_only: Some(true),
            ..Default::default()
        };
        let user = team_user();
        let params = query.into_params(Some(&user)).unwrap();
        assert_eq!(params.exclude_rated_by, Some(7));
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = ClipQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        let params = query.into_params(None).unwrap();
        assert!(params.search.is_none());
    }
}
