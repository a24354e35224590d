pub mod archives;
pub mod clips;
pub mod config;
pub mod health;
pub mod ratings;
pub mod seasons;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clips                     clip listing pipeline, submission
/// /clips/{id}                read, edit, delete
/// /clips/{id}/vote           public upvote/downvote
/// /clips/{id}/rating         team rating votes
/// /ratings                   batch tally reads
/// /seasons/...               season lifecycle and processing
/// /archives                  season archive metadata
/// /config/moderation         deny threshold
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clips", clips::router())
        .nest("/ratings", ratings::router())
        .nest("/seasons", seasons::router())
        .nest("/archives", archives::router())
        .nest("/config", config::router())
}
