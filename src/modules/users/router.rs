use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_coach, get_profile, update_profile};

pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/coach", post(create_coach))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/me", get(get_profile).put(update_profile))
        .merge(admin_routes)
}
