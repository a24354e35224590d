//! Route definitions for season lifecycle and processing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::seasons;
use crate::state::AppState;

/// Season routes mounted at `/seasons`.
///
/// ```text
/// GET  /current     -> current_season (public)
/// POST /activate    -> activate_season (admin)
/// POST /process     -> process_season (admin)
/// POST /close       -> close_season (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(seasons::current_season))
        .route("/activate", post(seasons::activate_season))
        .route("/process", post(seasons::process_season))
        .route("/close", post(seasons::close_season))
}
