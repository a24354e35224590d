use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use clipsesh_core::error::CoreError;
use clipsesh_core::pipeline::{self, QueryPage};
use clipsesh_core::scoring::ScoreWeights;
use clipsesh_core::types::DbId;
use clipsesh_db::models::clip::{Clip, CreateClip, UpdateClip};
use clipsesh_db::repositories::{ClipRepo, ConfigRepo, RatingRepo, VoteRepo};
use clipsesh_db::repositories::vote_repo::{VoteDirection, VoteOutcome};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::middleware::MaybeUser;
use crate::error::AppResult;
use crate::middleware::{RequireAdmin, RequireUploader};
use crate::query::ClipQuery;
use crate::state::AppState;

/// `GET /api/v1/clips`: the clip listing pipeline.
///
/// Loads the candidate set and the batch tallies in two round trips,
/// then filters, sorts, and paginates in memory so every sort key sees
/// the same tally snapshot.
pub async fn list_clips(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ClipQuery>,
) -> AppResult<Json<QueryPage<Clip>>> {
    let params = query.into_params(user.as_ref())?;

    let clips = ClipRepo::list(&state.pool).await?;
    let ids: Vec<DbId> = clips.iter().map(|c| c.id).collect();
    let tallies = RatingRepo::tallies(&state.pool, &ids).await?;
    let config = ConfigRepo::get(&state.pool).await?;
    let weights = ScoreWeights::default();

    let page = pipeline::run_query(clips, &params, &tallies, &config, &weights);
    Ok(Json(page))
}

/// `GET /api/v1/clips/{id}`.
pub async fn get_clip(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Clip>> {
    let clip = ClipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "clip", id })?;
    Ok(Json(clip))
}

/// `POST /api/v1/clips`: submit a new clip (uploader role or above).
pub async fn create_clip(
    State(state): State<AppState>,
    RequireUploader(user): RequireUploader,
    Json(mut body): Json<CreateClip>,
) -> AppResult<(StatusCode, Json<Clip>)> {
    if body.title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()).into());
    }
    if body.streamer.trim().is_empty() {
        return Err(CoreError::Validation("streamer must not be empty".into()).into());
    }
    if body.url.trim().is_empty() {
        return Err(CoreError::Validation("url must not be empty".into()).into());
    }
    // Submitter identity always comes from the token, never the body.
    body.submitter = user.username.clone();

    let clip = ClipRepo::create(&state.pool, &body).await?;
    tracing::info!(clip_id = clip.id, submitter = %user.username, "Clip submitted");
    Ok((StatusCode::CREATED, Json(clip)))
}

/// `PUT /api/v1/clips/{id}`: edit clip metadata (uploader role or above).
pub async fn update_clip(
    State(state): State<AppState>,
    RequireUploader(_user): RequireUploader,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateClip>,
) -> AppResult<Json<Clip>> {
    let clip = ClipRepo::update(&state.pool, id, &body)
        .await?
        .ok_or(CoreError::NotFound { entity: "clip", id })?;
    Ok(Json(clip))
}

/// `DELETE /api/v1/clips/{id}` (admin only). Rating votes and public
/// votes cascade with the row.
pub async fn delete_clip(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if !ClipRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "clip", id }.into());
    }
    tracing::info!(clip_id = id, admin = %user.username, "Clip deleted");
    Ok(Json(json!({ "message": "Clip deleted" })))
}

/// Body of a public vote request.
#[derive(Debug, Deserialize)]
pub struct VoteBody {
    /// `"up"` or `"down"`.
    pub vote: String,
}

/// `POST /api/v1/clips/{id}/vote`: public upvote/downvote.
///
/// Voters are tracked by a salted hash of the client address, so the
/// ledger never stores a raw IP.
pub async fn vote_clip(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(body): Json<VoteBody>,
) -> AppResult<Json<Value>> {
    let direction = match body.vote.as_str() {
        "up" => VoteDirection::Up,
        "down" => VoteDirection::Down,
        other => {
            return Err(
                CoreError::Validation(format!("vote must be 'up' or 'down', got '{other}'")).into(),
            )
        }
    };

    if !ClipRepo::exists(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "clip", id }.into());
    }

    let ip_hash = client_ip_hash(&headers, &state.config.jwt.secret);
    let outcome = VoteRepo::cast(&state.pool, id, &ip_hash, direction).await?;

    let message = match outcome {
        VoteOutcome::Recorded => "Vote recorded",
        VoteOutcome::Switched => "Vote switched",
        VoteOutcome::Withdrawn => "Vote withdrawn",
    };
    Ok(Json(json!({ "message": message })))
}

/// Hash the client address with the server secret as salt.
///
/// Trusts the left-most `x-forwarded-for` entry when present (the
/// deployment sits behind a reverse proxy); falls back to a fixed
/// placeholder otherwise.
fn client_ip_hash(headers: &HeaderMap, salt: &str) -> String {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown");

    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(ip.as_bytes());
    format!("{:x}", hasher.finalize())
}
