//! `/users` routes (admin only; the guard is applied by the parent router).

pub mod get;
pub mod patch;

use crate::state::AppState;
use axum::{Router, routing::{get, patch}};

use get::get_user;
use patch::deactivate_user;

/// - `GET /users/{user_id}` → `get_user`
/// - `PATCH /users/{user_id}/deactivate` → `deactivate_user`
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(get_user))
        .route("/{user_id}/deactivate", patch(deactivate_user))
}
