//! Route definitions for runtime configuration.

use axum::routing::get;
use axum::Router;

use crate::handlers::config;
use crate::state::AppState;

/// Config routes mounted at `/config`.
///
/// ```text
/// GET /moderation   -> get_moderation_config (team)
/// PUT /moderation   -> update_moderation_config (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/moderation",
        get(config::get_moderation_config).put(config::update_moderation_config),
    )
}
