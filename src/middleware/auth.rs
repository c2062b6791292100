use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use learnhub_auth::{TokenError, verify_token};
use learnhub_core::{AppError, UserRole};

use crate::state::AppState;

pub const ACCESS_TOKEN_REQUIRED: &str = "Access token required";
pub const USER_NO_LONGER_EXISTS: &str = "User no longer exists";

/// The caller behind a valid bearer token.
///
/// Role and email come from the stored user rather than the token, so a token
/// issued before a change never carries stale privileges. The first successful
/// extraction is cached in the request extensions; later extractors in the
/// same request (e.g. `require_roles` then the handler) reuse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Verify the token and confirm its subject still exists.
    pub(crate) fn from_token(token: &str, state: &AppState) -> Result<Self, AppError> {
        let claims = verify_token(token, &state.jwt_config).map_err(|err| {
            tracing::debug!(error = %err, "Rejected bearer token");
            AppError::unauthorized(err.to_string())
        })?;

        let user = state
            .users
            .find_by_id(&claims.sub)
            .ok_or_else(|| AppError::unauthorized(USER_NO_LONGER_EXISTS))?;

        Ok(Self {
            id: user.base.id,
            email: user.email,
            role: user.role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        AppError::unauthorized(ACCESS_TOKEN_REQUIRED)
                    } else {
                        AppError::unauthorized(TokenError::Invalid.to_string())
                    }
                })?;

        let user = Self::from_token(bearer.token(), state)?;
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
