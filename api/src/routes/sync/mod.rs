//! `/sync` routes: uploads of marks captured offline.

pub mod post;

use crate::auth::guards::allow_student;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::post};

use post::sync_attendance;

/// - `POST /sync/attendance` → `sync_attendance` (student)
pub fn sync_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/attendance", post(sync_attendance))
        .route_layer(from_fn_with_state(app_state, allow_student))
}
