//! Route definitions for clips, public votes, and rating votes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{clips, ratings};
use crate::state::AppState;

/// Clip routes mounted at `/clips`.
///
/// ```text
/// GET    /                  -> list_clips (public; team options gated)
/// POST   /                  -> create_clip (uploader+)
/// GET    /{id}              -> get_clip
/// PUT    /{id}              -> update_clip (uploader+)
/// DELETE /{id}              -> delete_clip (admin)
/// POST   /{id}/vote         -> vote_clip (public, per-IP)
/// GET    /{id}/rating       -> get_rating (team)
/// POST   /{id}/rating       -> submit_rating (team)
/// DELETE /{id}/rating       -> remove_rating (team)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clips::list_clips).post(clips::create_clip))
        .route(
            "/{id}",
            get(clips::get_clip)
                .put(clips::update_clip)
                .delete(clips::delete_clip),
        )
        .route("/{id}/vote", post(clips::vote_clip))
        .route(
            "/{id}/rating",
            get(ratings::get_rating)
                .post(ratings::submit_rating)
                .delete(ratings::remove_rating),
        )
}
