use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// GET /auth/me
///
/// Profile of the authenticated caller.
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users().get(claims.sub).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::from(user),
            "User data retrieved successfully",
        )),
    ))
}
