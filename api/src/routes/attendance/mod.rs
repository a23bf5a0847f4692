//! `/attendance` routes.

pub mod get;
pub mod post;

use crate::auth::guards::{allow_authenticated, allow_student};
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::{get, post}};

use get::{get_attendance_history, get_attendance_status};
use post::mark_attendance;

/// - `POST /attendance/mark` → `mark_attendance` (student)
/// - `GET /attendance/history` → `get_attendance_history` (student)
/// - `GET /attendance/status?session_id=&student_id=` → `get_attendance_status`
pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    let student_only = Router::new()
        .route("/mark", post(mark_attendance))
        .route("/history", get(get_attendance_history))
        .route_layer(from_fn_with_state(app_state.clone(), allow_student));

    let authenticated = Router::new()
        .route("/status", get(get_attendance_status))
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    student_only.merge(authenticated)
}
