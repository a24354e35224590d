use axum::extract::{Path, Query, State};
use axum::Json;
use clipsesh_core::error::CoreError;
use clipsesh_core::moderation;
use clipsesh_core::rating::{RatingCategory, RatingTally};
use clipsesh_core::scoring::{self, ScoreWeights};
use clipsesh_core::types::DbId;
use clipsesh_db::repositories::{ClipRepo, ConfigRepo, RatingRepo};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::RequireTeam;
use crate::state::AppState;

/// A clip's tally with its derived moderation and scoring state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyView {
    pub clip_id: DbId,
    pub tally: RatingTally,
    pub denied: bool,
    pub score: i64,
    /// Serialized as the string `"N/A"` when no numeric votes exist,
    /// since 0.0 would read as a genuine floor rating.
    #[serde(serialize_with = "serialize_average")]
    pub average_rating: Option<f64>,
}

fn serialize_average<S: Serializer>(avg: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match avg {
        Some(value) => s.serialize_f64(*value),
        None => s.serialize_str("N/A"),
    }
}

impl TallyView {
    fn build(clip_id: DbId, tally: RatingTally, config: &clipsesh_core::moderation::ModerationConfig) -> Self {
        let weights = ScoreWeights::default();
        let denied = moderation::is_denied(&tally, config);
        let score = scoring::weighted_score(&tally, &weights);
        let average_rating = scoring::average_rating(&tally);
        Self {
            clip_id,
            tally,
            denied,
            score,
            average_rating,
        }
    }
}

/// `GET /api/v1/clips/{id}/rating`: the clip's tally and derived state.
pub async fn get_rating(
    State(state): State<AppState>,
    RequireTeam(_user): RequireTeam,
    Path(id): Path<DbId>,
) -> AppResult<Json<TallyView>> {
    if !ClipRepo::exists(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "clip", id }.into());
    }
    let tally = RatingRepo::tally(&state.pool, id).await?;
    let config = ConfigRepo::get(&state.pool).await?;
    Ok(Json(TallyView::build(id, tally, &config)))
}

/// Body of a rating submission.
#[derive(Debug, Deserialize)]
pub struct RatingBody {
    /// Category label: `"1"` through `"4"` or `"deny"`.
    pub category: String,
}

/// `POST /api/v1/clips/{id}/rating`: submit or move the caller's vote.
///
/// Submitting the category the caller already holds is a no-op; the
/// response reflects the post-submission tally either way.
pub async fn submit_rating(
    State(state): State<AppState>,
    RequireTeam(user): RequireTeam,
    Path(id): Path<DbId>,
    Json(body): Json<RatingBody>,
) -> AppResult<Json<TallyView>> {
    let category = RatingCategory::parse(&body.category)?;

    if !ClipRepo::exists(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "clip", id }.into());
    }

    RatingRepo::submit(&state.pool, id, user.user_id, &user.username, category).await?;
    tracing::debug!(
        clip_id = id,
        user_id = user.user_id,
        category = category.as_str(),
        "Rating submitted"
    );

    let tally = RatingRepo::tally(&state.pool, id).await?;
    let config = ConfigRepo::get(&state.pool).await?;
    Ok(Json(TallyView::build(id, tally, &config)))
}

/// `DELETE /api/v1/clips/{id}/rating`: withdraw the caller's vote.
pub async fn remove_rating(
    State(state): State<AppState>,
    RequireTeam(user): RequireTeam,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if !ClipRepo::exists(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "clip", id }.into());
    }
    let removed = RatingRepo::remove(&state.pool, id, user.user_id).await?;
    Ok(Json(json!({
        "message": if removed { "Vote withdrawn" } else { "No vote to withdraw" },
        "removed": removed,
    })))
}

/// Query string for the batch tally endpoint.
#[derive(Debug, Deserialize)]
pub struct TalliesQuery {
    /// Comma-separated clip ids.
    pub ids: String,
}

/// `GET /api/v1/ratings?ids=1,2,3`: batch tallies for the rating view.
///
/// Clips without votes come back with an empty tally so the client can
/// mark them unrated.
pub async fn batch_tallies(
    State(state): State<AppState>,
    RequireTeam(_user): RequireTeam,
    Query(query): Query<TalliesQuery>,
) -> AppResult<Json<Vec<TallyView>>> {
    let ids: Vec<DbId> = query
        .ids
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| CoreError::Validation(format!("Invalid clip id: '{s}'")))
        })
        .collect::<Result<_, _>>()?;

    if ids.is_empty() {
        return Err(CoreError::Validation("ids must not be empty".into()).into());
    }

    let mut tallies = RatingRepo::tallies(&state.pool, &ids).await?;
    let config = ConfigRepo::get(&state.pool).await?;

    let views = ids
        .into_iter()
        .map(|id| {
            let tally = tallies.remove(&id).unwrap_or_default();
            TallyView::build(id, tally, &config)
        })
        .collect();
    Ok(Json(views))
}
