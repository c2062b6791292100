//! Course payload extractor.
//!
//! Course create and update accept either a JSON body or
//! `multipart/form-data` with text fields plus an optional `image` file.
//! Both forms go through the same validation rules.

use axum::{
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use learnhub_core::file_storage::UploadedFile;
use learnhub_core::{AppError, FieldError};
use learnhub_models::{AT_LEAST_ONE_FIELD, CreateCourseRequest, UpdateCourseRequest};

use crate::validator::{ValidatedJson, deserialize_error, validate};

/// Name of the multipart field carrying the cover image.
pub const IMAGE_FIELD: &str = "image";

/// A DTO that can arrive as a course form.
pub trait FormData: DeserializeOwned + Validate {
    /// Whether any field was provided. An image alone also counts as content.
    fn has_content(&self) -> bool {
        true
    }
}

impl FormData for CreateCourseRequest {}

impl FormData for UpdateCourseRequest {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

#[derive(Debug)]
pub struct CourseForm<T> {
    pub data: T,
    pub image: Option<UploadedFile>,
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::new(err.status(), anyhow::anyhow!(err.body_text()))
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

async fn read_multipart<T: DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<(T, Option<UploadedFile>), AppError> {
    let mut fields = Map::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;

            // Browsers send an empty part when no file was chosen.
            if !bytes.is_empty() {
                image = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            fields.insert(name, Value::String(text));
        }
    }

    let data = serde_json::from_value(Value::Object(fields))
        .map_err(|err| deserialize_error(&err.to_string()))?;

    Ok((data, image))
}

impl<T, S> FromRequest<S> for CourseForm<T>
where
    T: FormData,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (data, image) = if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::new(rejection.status(), anyhow::anyhow!(rejection.body_text())))?;
            let (data, image): (T, _) = read_multipart(multipart).await?;
            validate(&data)?;
            (data, image)
        } else {
            let ValidatedJson(data) = ValidatedJson::<T>::from_request(req, state).await?;
            (data, None)
        };

        if !data.has_content() && image.is_none() {
            return Err(AppError::validation(vec![FieldError::new(
                "body",
                AT_LEAST_ONE_FIELD,
            )]));
        }

        Ok(Self { data, image })
    }
}
