use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::PathParam;
use crate::response::ApiResponse;
use crate::routes::common::SessionResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// PATCH /sessions/end/{session_id}
///
/// ### Responses
/// - `200 OK` with the ended session
/// - `400 Bad Request` if it already ended
/// - `403 Forbidden` if the caller does not own it
/// - `404 Not Found`
pub async fn end_session(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    PathParam(session_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sessions().end_session(session_id, claims.sub).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            SessionResponse::from(session),
            "Session ended",
        )),
    ))
}
