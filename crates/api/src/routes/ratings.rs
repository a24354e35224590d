//! Route definitions for batch tally reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::ratings;
use crate::state::AppState;

/// Rating routes mounted at `/ratings`.
///
/// ```text
/// GET /?ids=1,2,3   -> batch_tallies (team)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(ratings::batch_tallies))
}
