use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use learnhub_core::errors::ErrorResponse;
use learnhub_core::{ApiResponse, AppError};
use learnhub_models::{Course, CourseFilterParams, CreateCourseRequest, UpdateCourseRequest};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::form::CourseForm;
use super::service::COURSE_NOT_FOUND;

/// List courses, optionally filtered by creator or a search term
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "List of courses", body = Vec<Course>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(filters): Query<CourseFilterParams>,
) -> Json<ApiResponse<Vec<Course>>> {
    let courses = match (filters.creator_id.as_deref(), filters.search.as_deref()) {
        (Some(creator_id), _) => state.course_service.get_courses_by_creator(creator_id),
        (None, Some(term)) => state.course_service.search_courses(term),
        (None, None) => state.course_service.get_all_courses(),
    };

    Json(ApiResponse::data(courses))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = state
        .course_service
        .get_course_by_id(&id)
        .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND))?;

    Ok(Json(ApiResponse::data(course)))
}

/// Create a course (Coach or Admin). Accepts JSON or multipart with an `image` file.
#[utoipa::path(
    post,
    path = "/courses",
    request_body(content = CreateCourseRequest, description = "JSON body, or multipart/form-data with an optional `image` file"),
    responses(
        (status = 201, description = "Course created successfully", body = Course),
        (status = 400, description = "Validation error or invalid image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, form))]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    form: CourseForm<CreateCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let course = state
        .course_service
        .create_course(form.data, &auth_user.id, form.image)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Course created successfully", course)),
    ))
}

/// Update a course (its creator or an Admin)
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course id")
    ),
    request_body(content = UpdateCourseRequest, description = "JSON body, or multipart/form-data with an optional `image` file"),
    responses(
        (status = 200, description = "Course updated successfully", body = Course),
        (status = 400, description = "Validation error or invalid image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the course creator", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, form))]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    form: CourseForm<UpdateCourseRequest>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = state
        .course_service
        .update_course(&id, &auth_user.id, auth_user.role, form.data, form.image)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Course updated successfully",
        course,
    )))
}

/// Delete a course (its creator or an Admin)
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Course deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the course creator", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .course_service
        .delete_course(&id, &auth_user.id, auth_user.role)
        .await?;

    Ok(Json(ApiResponse::message("Course deleted successfully")))
}
