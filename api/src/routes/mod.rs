//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness (public)
//! - `/auth` → register, login, own profile
//! - `/sessions` → opening, ending, and reading attendance sessions
//! - `/attendance` → live marks and attendance status
//! - `/sync` → offline batch uploads
//! - `/devices` → device bindings of the caller
//! - `/users` → user administration (admin only)

use crate::auth::guards::allow_admin;
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, devices::devices_routes,
    health::health_routes, sessions::sessions_routes, sync::sync_routes, users::users_routes,
};
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state};

pub mod attendance;
pub mod auth;
pub mod common;
pub mod devices;
pub mod health;
pub mod sessions;
pub mod sync;
pub mod users;

/// Builds the router for every HTTP endpoint, with guards attached.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/sessions", sessions_routes(app_state.clone()))
        .nest("/attendance", attendance_routes(app_state.clone()))
        .nest("/sync", sync_routes(app_state.clone()))
        .nest("/devices", devices_routes(app_state.clone()))
        .nest(
            "/users",
            users_routes().route_layer(from_fn_with_state(app_state, allow_admin)),
        )
}
