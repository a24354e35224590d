use axum::extract::State;
use axum::Json;
use chrono::Utc;
use clipsesh_core::error::CoreError;
use clipsesh_core::processing::{self, ProcessOutcome};
use clipsesh_core::season::{self, Season};
use clipsesh_db::models::season::SeasonRow;
use clipsesh_db::repositories::{ClipRepo, ConfigRepo, RatingRepo, SeasonRepo};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Season info for the public header widget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonInfo {
    /// The calendar season for today's date.
    pub current: Season,
    /// Bookkeeping row for the active season, if one has been activated.
    pub active: Option<SeasonRow>,
}

/// `GET /api/v1/seasons/current`: the calendar season plus the active
/// bookkeeping row.
pub async fn current_season(State(state): State<AppState>) -> AppResult<Json<SeasonInfo>> {
    let current = season::season_for_date(Utc::now().date_naive());
    let active = SeasonRepo::active(&state.pool).await?;
    Ok(Json(SeasonInfo { current, active }))
}

/// `POST /api/v1/seasons/activate` (admin): open the calendar season
/// for rating. Deactivates any previously active season.
pub async fn activate_season(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> AppResult<Json<SeasonRow>> {
    let current = season::season_for_date(Utc::now().date_naive());
    let row = SeasonRepo::activate(&state.pool, current).await?;
    tracing::info!(season = %current.slug(), admin = %user.username, "Season activated");
    Ok(Json(row))
}

/// `POST /api/v1/seasons/process` (admin): run the season processor.
///
/// Takes one snapshot of every tally, partitions the clip set, and
/// returns the package request plus the denied and unrated exclusions.
/// Pure computation over the snapshot, so a rerun over unchanged votes
/// returns the same outcome.
pub async fn process_season(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> AppResult<Json<ProcessOutcome>> {
    let active = SeasonRepo::active(&state.pool)
        .await?
        .ok_or_else(|| CoreError::Validation("No active season to process".into()))?;
    let season = active
        .season()
        .ok_or_else(|| CoreError::Internal(format!("Malformed season label: {}", active.name)))?;

    let clips = ClipRepo::list(&state.pool).await?;
    let tallies = RatingRepo::all_tallies(&state.pool).await?;
    let config = ConfigRepo::get(&state.pool).await?;

    let outcome = processing::process_season(&clips, &tallies, &config, season);

    SeasonRepo::set_clip_amount(&state.pool, season, outcome.package.clip_amount as i64).await?;

    tracing::info!(
        season = %season.slug(),
        packaged = outcome.package.clip_amount,
        denied = outcome.denied.len(),
        unrated = outcome.unrated.len(),
        admin = %user.username,
        "Season processed"
    );
    Ok(Json(outcome))
}

/// `POST /api/v1/seasons/close` (admin): close out the active season.
pub async fn close_season(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> AppResult<Json<Value>> {
    match SeasonRepo::close_active(&state.pool).await? {
        Some(row) => {
            tracing::info!(season = %row.name, year = row.year, admin = %user.username, "Season closed");
            Ok(Json(json!({ "message": "Season closed", "season": row })))
        }
        None => Err(CoreError::Validation("No active season to close".into()).into()),
    }
}
