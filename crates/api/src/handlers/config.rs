use axum::extract::State;
use axum::Json;
use clipsesh_core::moderation::ModerationConfig;
use clipsesh_db::repositories::ConfigRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::{RequireAdmin, RequireTeam};
use crate::state::AppState;

/// `GET /api/v1/config/moderation` (team): the active deny threshold.
pub async fn get_moderation_config(
    State(state): State<AppState>,
    RequireTeam(_user): RequireTeam,
) -> AppResult<Json<ModerationConfig>> {
    let config = ConfigRepo::get(&state.pool).await?;
    Ok(Json(config))
}

/// Body for updating the moderation config.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModerationConfig {
    pub deny_threshold: i64,
}

/// `PUT /api/v1/config/moderation` (admin): set the deny threshold.
///
/// Validation rejects thresholds below 1; the stored value is never
/// silently clamped.
pub async fn update_moderation_config(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(body): Json<UpdateModerationConfig>,
) -> AppResult<Json<ModerationConfig>> {
    let config = ModerationConfig {
        deny_threshold: body.deny_threshold,
    };
    config.validate()?;

    ConfigRepo::set(&state.pool, &config).await?;
    tracing::info!(
        deny_threshold = config.deny_threshold,
        admin = %user.username,
        "Moderation config updated"
    );
    Ok(Json(config))
}
