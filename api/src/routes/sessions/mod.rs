//! `/sessions` routes.
//!
//! Starting and ending sessions and reading a session's roster are teacher
//! only; everything else needs any authenticated caller.

pub mod get;
pub mod patch;
pub mod post;

use crate::auth::guards::{allow_authenticated, allow_teacher};
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::{get, patch, post}};

use get::{get_active_session, get_session, get_session_records, list_sessions};
use patch::end_session;
use post::start_session;

/// - `POST /sessions/start` → `start_session` (teacher)
/// - `PATCH /sessions/end/{session_id}` → `end_session` (teacher)
/// - `GET /sessions/{session_id}/records` → `get_session_records` (teacher)
/// - `GET /sessions/active?course_id=` → `get_active_session`
/// - `GET /sessions?course_id=&teacher_id=` → `list_sessions`
/// - `GET /sessions/{session_id}` → `get_session`
pub fn sessions_routes(app_state: AppState) -> Router<AppState> {
    let teacher_only = Router::new()
        .route("/start", post(start_session))
        .route("/end/{session_id}", patch(end_session))
        .route("/{session_id}/records", get(get_session_records))
        .route_layer(from_fn_with_state(app_state.clone(), allow_teacher));

    let authenticated = Router::new()
        .route("/", get(list_sessions))
        .route("/active", get(get_active_session))
        .route("/{session_id}", get(get_session))
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    teacher_only.merge(authenticated)
}
