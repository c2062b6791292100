use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use learnhub_core::errors::ErrorResponse;
use learnhub_core::{ApiResponse, AppError};
use learnhub_models::{CreateCoachRequest, UpdateProfileRequest, UserResponse};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::USER_NOT_FOUND;

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_service
        .get_user_by_id(&auth_user.id)
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

    Ok(Json(ApiResponse::data(user)))
}

/// Update the current user's name and/or email
#[utoipa::path(
    put,
    path = "/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.update_profile(&auth_user.id, dto)?;
    Ok(Json(ApiResponse::with_message(
        "Profile updated successfully",
        user,
    )))
}

/// Create a coach account (Admin only)
#[utoipa::path(
    post,
    path = "/users/coach",
    request_body = CreateCoachRequest,
    responses(
        (status = 201, description = "Coach created successfully", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_coach(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCoachRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let coach = state.user_service.create_coach(dto).await?;
    tracing::info!(admin_id = %admin.id, coach_id = %coach.id, "Coach account created by admin");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Coach created successfully", coach)),
    ))
}
