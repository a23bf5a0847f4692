pub mod auth;
pub mod error;
pub mod extract;
pub mod rate_limit;
pub mod response;
pub mod routes;
pub mod state;

use crate::auth::middleware::log_request;
use crate::rate_limit::rate_limit;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state};
use tower_http::cors::CorsLayer;

/// The complete application: `/api` routes behind per-client rate limiting,
/// request logging and CORS.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::routes(app_state.clone()))
        .layer(from_fn_with_state(app_state.clone(), rate_limit))
        .layer(from_fn_with_state(app_state.clone(), log_request))
        .layer(CorsLayer::very_permissive())
        .with_state(app_state)
}
