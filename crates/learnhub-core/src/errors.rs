//! Application error type and the uniform error envelope.
//!
//! Every handler returns `Result<_, AppError>`. The error carries the HTTP
//! status it maps to, so the conversion into a response is a single place:
//!
//! ```json
//! { "success": false, "error": "Course not found" }
//! { "success": false, "error": "Validation Error", "errors": [{ "field": "email", "message": "Invalid email format" }] }
//! ```
//!
//! Server errors never leak their message in the body. The detail is attached
//! to the response as an [`InternalErrorDetail`] extension so a later layer can
//! decide whether to surface it (development mode only).

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body message used for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Top-level message of a request that failed schema validation.
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation Error";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// JSON envelope for failed requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            errors: None,
        }
    }
}

/// Message of a server error, kept out of the response body.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub field_errors: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow!(message.into()))
    }

    /// 400 with per-field messages.
    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!(VALIDATION_ERROR_MESSAGE),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, anyhow!(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, anyhow!(message.into()))
    }

    /// `ValidationErrors` is itself a std error, so the blanket `From` would
    /// turn it into a 500. Convert explicitly instead.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        Self::validation(field_errors_from(errors))
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Flattens `validator` output into field/message pairs, sorted by field name
/// so responses are stable. Struct-level failures are reported on `body`.
pub fn field_errors_from(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            let field: &str = if *field == "__all__" { "body" } else { &**field };
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");

            let body = Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE));
            let mut response = (self.status, body).into_response();
            response
                .extensions_mut()
                .insert(InternalErrorDetail(format!("{:#}", self.error)));
            return response;
        }

        let errors = if self.field_errors.is_empty() {
            None
        } else {
            Some(self.field_errors)
        };

        let body = Json(ErrorResponse {
            success: false,
            error: self.error.to_string(),
            errors,
        });

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use validator::Validate;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
        name: String,
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = AppError::not_found("Course not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Course not found");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response = AppError::internal(anyhow!("lock poisoned at repo.rs:42")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = response.extensions().get::<InternalErrorDetail>().cloned();
        assert_eq!(detail.unwrap().0, "lock poisoned at repo.rs:42");

        let body = body_json(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_validation_errors_are_listed_per_field() {
        let signup = Signup {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
        };
        let err = AppError::from_validation_errors(&signup.validate().unwrap_err());
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.field_errors,
            vec![
                FieldError::new("email", "Invalid email format"),
                FieldError::new("name", "Name must be at least 2 characters long"),
            ]
        );

        let body = body_json(err.into_response()).await;
        assert_eq!(body["error"], VALIDATION_ERROR_MESSAGE);
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][1]["message"], "Name must be at least 2 characters long");
    }

    #[test]
    fn test_unknown_errors_become_internal() {
        let io = std::io::Error::other("disk on fire");
        let err: AppError = io.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_helpers() {
        assert_eq!(AppError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("x").status, StatusCode::FORBIDDEN);
        assert_eq!(AppError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(AppError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("Email already in use").message(), "Email already in use");
    }
}
