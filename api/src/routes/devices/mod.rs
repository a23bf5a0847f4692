//! `/devices` routes. Every route acts on behalf of the authenticated caller.

pub mod delete;
pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::{get, post}};

use delete::unbind_device;
use get::{get_device, list_devices};
use post::bind_device;

/// - `POST /devices/bind` → `bind_device`
/// - `GET /devices` → `list_devices`
/// - `GET /devices/{device_id}` → `get_device`
/// - `DELETE /devices/{device_id}` → `unbind_device`
pub fn devices_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_devices))
        .route("/bind", post(bind_device))
        .route("/{device_id}", get(get_device).delete(unbind_device))
        .route_layer(from_fn_with_state(app_state, allow_authenticated))
}
