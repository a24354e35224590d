//! JWT issuance and verification.

use chrono::Utc;
use clipsesh_core::error::CoreError;
use clipsesh_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// JWT signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in seconds (default: 24 hours).
    pub expiry_secs: i64,
}

impl JwtConfig {
    /// Load from `JWT_SECRET` and `JWT_EXPIRY_SECS` environment variables.
    ///
    /// Falls back to an insecure development secret when `JWT_SECRET`
    /// is unset; production deployments must set it.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using insecure development secret");
            "clipsesh-dev-secret-do-not-use-in-production".into()
        });
        let expiry_secs: i64 = std::env::var("JWT_EXPIRY_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("JWT_EXPIRY_SECS must be a valid i64");
        Self {
            secret,
            expiry_secs,
        }
    }
}

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Display name, denormalized into voter records.
    pub username: String,
    /// Role names held by the user.
    pub roles: Vec<String>,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Unique token id.
    pub jti: String,
}

/// Issue a signed token for the given user.
pub fn issue_token(
    config: &JwtConfig,
    user_id: DbId,
    username: &str,
    roles: &[String],
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        roles: roles.to_vec(),
        exp: now + config.expiry_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Failed to sign token: {e}")))
}

/// Verify a token and return its claims.
pub fn verify_token(config: &JwtConfig, token: &str) -> Result<Claims, CoreError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| CoreError::Unauthorized(format!("Invalid token: {e}")))
}
