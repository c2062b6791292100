#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use learnhub::router::init_router;
use learnhub::state::AppState;
use learnhub_auth::create_access_token;
use learnhub_config::AppConfig;
use learnhub_core::{UserRole, hash_password};
use learnhub_models::{NewUser, User};

pub const TEST_PASSWORD: &str = "secret123";
pub const BOUNDARY: &str = "learnhub-integration-boundary";

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

pub fn test_config(upload_dir: &str) -> AppConfig {
    let lookup = |key: &str| match key {
        "PORT" => Some("0".to_string()),
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        "JWT_EXPIRES_IN" => Some("1h".to_string()),
        "SALT_ROUNDS" => Some("4".to_string()),
        "APP_ENV" => Some("test".to_string()),
        "UPLOAD_DIR" => Some(upload_dir.to_string()),
        _ => None,
    };
    AppConfig::from_lookup(&lookup).unwrap()
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn new() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("learnhub-it-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&upload_dir).unwrap();

        let config = test_config(upload_dir.to_str().unwrap());
        let state = AppState::new(&config);
        let router = init_router(state.clone());

        Self {
            state,
            router,
            upload_dir,
        }
    }

    /// Stores a user directly and returns it with a valid token.
    pub fn create_user(&self, role: UserRole) -> (User, String) {
        let user = self
            .state
            .users
            .create(NewUser {
                name: "Test User".to_string(),
                email: generate_unique_email(),
                password: hash_password(TEST_PASSWORD, 4).unwrap(),
                role,
            })
            .unwrap();
        let token =
            create_access_token(&user.base.id, &user.email, role, &self.state.jwt_config).unwrap();
        (user, token)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    /// Raw response, for endpoints that do not answer with JSON.
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// A multipart part: field name, optional (file name, content type), content.
pub type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a [u8]);

pub fn multipart_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    parts: &[Part<'_>],
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match file {
            Some((file_name, content_type)) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                name, file_name, content_type
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", BOUNDARY),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}
