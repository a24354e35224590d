use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clipsesh_core::error::CoreError;
use clipsesh_core::types::DbId;
use clipsesh_db::models::archive::{CreateSeasonArchive, SeasonArchive};
use clipsesh_db::repositories::ArchiveRepo;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// `GET /api/v1/archives`: all recorded archives, newest first.
pub async fn list_archives(State(state): State<AppState>) -> AppResult<Json<Vec<SeasonArchive>>> {
    let archives = ArchiveRepo::list(&state.pool).await?;
    Ok(Json(archives))
}

/// `GET /api/v1/archives/{id}`.
pub async fn get_archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SeasonArchive>> {
    let archive = ArchiveRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "archive",
            id,
        })?;
    Ok(Json(archive))
}

/// `POST /api/v1/archives` (admin): record a completed archive upload.
///
/// The zip itself is produced and stored out of band; this endpoint
/// persists the metadata once storage has acked the upload.
pub async fn create_archive(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(body): Json<CreateSeasonArchive>,
) -> AppResult<(StatusCode, Json<SeasonArchive>)> {
    if !matches!(body.season.as_str(), "Spring" | "Summer" | "Fall" | "Winter") {
        return Err(
            CoreError::Validation(format!("Unknown season label: '{}'", body.season)).into(),
        );
    }
    if body.file_url.trim().is_empty() {
        return Err(CoreError::Validation("fileUrl must not be empty".into()).into());
    }
    if body.size < 0 || body.clip_amount < 0 {
        return Err(CoreError::Validation("size and clipAmount must be non-negative".into()).into());
    }

    let archive = ArchiveRepo::create(&state.pool, &body).await?;
    tracing::info!(
        archive_id = archive.id,
        season = %archive.season,
        year = archive.year,
        admin = %user.username,
        "Archive recorded"
    );
    Ok((StatusCode::CREATED, Json(archive)))
}

/// `DELETE /api/v1/archives/{id}` (admin): drop the metadata row.
/// Does not touch the stored zip.
pub async fn delete_archive(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if !ArchiveRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "archive",
            id,
        }
        .into());
    }
    tracing::info!(archive_id = id, admin = %user.username, "Archive deleted");
    Ok(Json(json!({ "message": "Archive deleted" })))
}
