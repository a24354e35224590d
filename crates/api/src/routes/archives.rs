//! Route definitions for season archive metadata.

use axum::routing::get;
use axum::Router;

use crate::handlers::archives;
use crate::state::AppState;

/// Archive routes mounted at `/archives`.
///
/// ```text
/// GET    /          -> list_archives (public)
/// POST   /          -> create_archive (admin)
/// GET    /{id}      -> get_archive (public)
/// DELETE /{id}      -> delete_archive (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(archives::list_archives).post(archives::create_archive),
        )
        .route(
            "/{id}",
            get(archives::get_archive).delete(archives::delete_archive),
        )
}
