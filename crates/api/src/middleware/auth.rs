//! JWT-based authentication extractor for Axum handlers.

use agora_core::error::CoreError;
use agora_core::types::DbId;
use agora_db::repositories::UserRepo;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::jwt::{validate_token, TokenRejection};
use crate::error::AppError;
use crate::state::AppState;

/// Message of the 401 body when no bearer token is presented.
pub const TOKEN_NOT_FOUND: &str = "JWT Token not found";

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// A missing header, or one without the `Bearer ` scheme, is rejected with
/// [`TOKEN_NOT_FOUND`]; a bad or expired token with its own message. A
/// token whose subject no longer exists or is deactivated counts as
/// invalid. The role is taken from the user row, not the token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"admin"`, `"process_manager"`, `"user"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(TOKEN_NOT_FOUND.into())))?;

        let claims = validate_token(token, &state.config.jwt).map_err(|rejection| {
            tracing::debug!(?rejection, "Bearer token rejected");
            AppError::Core(CoreError::Unauthorized(rejection.message().into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.sub, "Token subject missing or inactive");
                AppError::Core(CoreError::Unauthorized(
                    TokenRejection::Invalid.message().into(),
                ))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}
