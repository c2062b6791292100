use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use learnhub_core::UserRole;
use learnhub_core::errors::{ErrorResponse, FieldError};
use learnhub_models::{
    AuthResponse, Course, CreateCoachRequest, CreateCourseRequest, LoginRequest, RegisterRequest,
    UpdateCourseRequest, UpdateProfileRequest, UserResponse,
};

use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::create_coach,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::health::controller::health_check,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateProfileRequest,
            CreateCoachRequest,
            Course,
            CreateCourseRequest,
            UpdateCourseRequest,
            HealthResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profiles and coach accounts"),
        (name = "Courses", description = "Course catalogue management"),
        (name = "Health", description = "Liveness check")
    ),
    info(
        title = "LearnHub API",
        version = "0.1.0",
        description = "Learning platform REST API built with Rust and Axum: JWT authentication, role-based access and course management.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/auth/register",
            "/auth/login",
            "/users/me",
            "/users/coach",
            "/courses",
            "/courses/{id}",
            "/health",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
