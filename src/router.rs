use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use learnhub_observability::logging_middleware;

use crate::docs::ApiDoc;
use crate::middleware::error::{error_formatter, handle_panic, route_not_found};
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::health::router::init_health_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let cors = {
        let allowed_origins: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true)
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", init_auth_router())
        .nest("/users", init_users_router(state.clone()))
        .nest("/courses", init_courses_router(state.clone()))
        .nest("/health", init_health_router())
        .nest_service(
            state.upload_config.public_prefix.as_str(),
            ServeDir::new(&state.upload_config.dir),
        )
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(state.upload_config.max_body_size))
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.app_env, error_formatter))
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
}
