//! Role-based authorization middleware for Axum.
//!
//! Applied with `route_layer` so it only runs for matched routes:
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/coach", post(create_coach))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use learnhub_core::AppError;
use learnhub_core::permissions::{ADMINS, COURSE_AUTHORS, UserRole, role_allowed};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";

/// Authenticates the caller and checks their role against `allowed_roles`.
///
/// The resulting [`AuthUser`] stays in the request extensions for the handler.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &'static [UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !role_allowed(auth_user.role, allowed_roles).is_allowed() {
        tracing::warn!(
            user_id = %auth_user.id,
            role = %auth_user.role,
            ?allowed_roles,
            "Role not allowed for route"
        );
        return Err(AppError::forbidden(INSUFFICIENT_PERMISSIONS));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_admin(state: State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(state, req, next, ADMINS).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

pub async fn require_course_author(state: State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(state, req, next, COURSE_AUTHORS).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}
