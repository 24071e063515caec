//! API Routes
//!
//! `/ads/{country_code}` is public; `/ads` is split by method between the
//! dashboard and processing roles.

mod error;
mod priorities;

#[cfg(test)]
mod auth_tests;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::middleware::{require_role, Role, RoleGuard};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let dashboard = Router::new()
        .route("/ads", get(priorities::list_priorities))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(Role::Dashboard, state.auth()),
            require_role,
        ));

    let processing = Router::new()
        .route("/ads", put(priorities::update_priorities))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(Role::Processing, state.auth()),
            require_role,
        ));

    Router::new()
        .route("/ads/:country_code", get(priorities::get_priorities))
        .merge(dashboard)
        .merge(processing)
}
