use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use learnhub_core::{AppError, FieldError};

/// Turns a serde error message into the matching client error.
pub(crate) fn deserialize_error(message: &str) -> AppError {
    if message.contains("missing field") {
        let field = message
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::validation(vec![FieldError::new(
            field,
            format!("{} is required", field),
        )]);
    }

    if message.contains("invalid type") {
        return AppError::bad_request("Invalid field type in request");
    }

    AppError::bad_request("Invalid request body")
}

/// Runs the `validator` rules of an already deserialized value.
pub(crate) fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::from_validation_errors(&errors))
}

/// JSON body extractor that also runs the DTO's validation rules.
///
/// Every failure is a 400 in the common error envelope, with per-field
/// messages when the body parsed but broke a rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::bad_request("Missing 'Content-Type: application/json' header")
                }
                JsonRejection::JsonSyntaxError(_) => AppError::bad_request("Malformed JSON body"),
                JsonRejection::BytesRejection(rejection) => {
                    AppError::new(rejection.status(), anyhow::anyhow!(rejection.body_text()))
                }
                other => deserialize_error(&other.body_text()),
            })?;

        validate(&value)?;

        Ok(ValidatedJson(value))
    }
}
