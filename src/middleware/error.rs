//! Last stop for every response leaving the router.
//!
//! Handlers and extractors already answer with the `{success: false, error}`
//! envelope. Responses produced by axum itself (405, 413, path rejections) and
//! by panics do not, so this layer rewrites any non-JSON error response into
//! the envelope. In development it also swaps the generic 500 message for the
//! real cause.

use std::any::Any;

use axum::{
    Json,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{Method, StatusCode, Uri, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use learnhub_config::AppEnv;
use learnhub_core::AppError;
use learnhub_core::errors::{ErrorResponse, InternalErrorDetail};

/// Error bodies larger than this are not worth echoing back.
const MAX_ERROR_BODY: usize = 16 * 1024;

pub async fn error_formatter(State(app_env): State<AppEnv>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    if let Some(detail) = response.extensions().get::<InternalErrorDetail>().cloned() {
        if app_env.is_development() {
            return (status, Json(ErrorResponse::new(detail.0))).into_response();
        }
        return response;
    }

    if is_json(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = match to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Err(_) => String::new(),
    };

    let message = if text.is_empty() || status.is_server_error() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        text
    };

    let mut rewritten = (status, Json(ErrorResponse::new(message))).into_response();
    for name in [header::ALLOW, header::WWW_AUTHENTICATE] {
        if let Some(value) = parts.headers.get(&name) {
            rewritten.headers_mut().insert(name, value.clone());
        }
    }
    rewritten
}

fn is_json(response: &Response<Body>) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Fallback for unmatched routes.
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    AppError::not_found(format!("Route {} {} not found", method, target))
}

/// Used by `CatchPanicLayer`: the panic becomes an ordinary 500.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        anyhow::anyhow!("Handler panicked: {}", detail),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::{Router, middleware, routing::get};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(app_env: AppEnv) -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/boom",
                get(|| async { AppError::internal(anyhow::anyhow!("store exploded")) }),
            )
            .route(
                "/plain",
                get(|| async { (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded") }),
            )
            .fallback(route_not_found)
            .layer(middleware::from_fn_with_state(app_env, error_formatter))
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_success_untouched() {
        let (status, _) = send(app(AppEnv::Production), "GET", "/ok").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_internal_detail_only_in_development() {
        let (status, body) = send(app(AppEnv::Production), "GET", "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");

        let (_, body) = send(app(AppEnv::Development), "GET", "/boom").await;
        assert_eq!(body["error"], "store exploded");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_plain_errors_are_wrapped() {
        let (status, body) = send(app(AppEnv::Production), "GET", "/plain").await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "length limit exceeded");
    }

    #[tokio::test]
    async fn test_method_not_allowed_is_wrapped() {
        let (status, body) = send(app(AppEnv::Production), "DELETE", "/ok").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(app(AppEnv::Production), "GET", "/nowhere?x=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Route GET /nowhere?x=1 not found");
    }

    #[test]
    fn test_panic_becomes_500() {
        let response = handle_panic(Box::new("oh no"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<InternalErrorDetail>().unwrap();
        assert_eq!(detail.0, "Handler panicked: oh no");
    }
}
