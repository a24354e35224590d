use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clipsesh_core::error::CoreError;
use clipsesh_core::roles;

use crate::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an authenticated user holding the admin role.
///
/// Use as a handler argument to gate administrative endpoints:
///
/// ```ignore
/// async fn close_season(RequireAdmin(user): RequireAdmin, ...) -> AppResult<...>
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::is_admin(&user.roles) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires an authenticated user on the clip team (admin or clipteam).
pub struct RequireTeam(pub AuthUser);

impl FromRequestParts<AppState> for RequireTeam {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::is_team(&user.roles) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Clip team role required".into(),
            )));
        }
        Ok(RequireTeam(user))
    }
}

/// Requires an authenticated user allowed to submit clips
/// (uploader, clipteam, or admin).
pub struct RequireUploader(pub AuthUser);

impl FromRequestParts<AppState> for RequireUploader {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::can_upload(&user.roles) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Uploader role required".into(),
            )));
        }
        Ok(RequireUploader(user))
    }
}
