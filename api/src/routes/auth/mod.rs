//! `/auth` routes.
//!
//! - `post.rs`: register and login
//! - `get.rs`: current user
//! - `put.rs`: profile updates of the current user

pub mod get;
pub mod post;
pub mod put;

use crate::state::AppState;
use axum::{Router, routing::{get, post}};

use get::get_me;
use post::{login, register};
use put::update_me;

/// - `POST /auth/register` → `register`
/// - `POST /auth/login` → `login`
/// - `GET /auth/me` → `get_me`
/// - `PUT /auth/me` → `update_me`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_me).put(update_me))
}
