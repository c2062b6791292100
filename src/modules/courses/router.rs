use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::require_course_author;
use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};

/// Reads are public; writes need a COACH or ADMIN token.
pub fn init_courses_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(get_courses))
        .route("/{id}", get(get_course));

    let protected = Router::new()
        .route("/", post(create_course))
        .route("/{id}", put(update_course).delete(delete_course))
        .route_layer(middleware::from_fn_with_state(state, require_course_author));

    public.merge(protected)
}
