use crate::error::ApiError;
use crate::extract::PathParam;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// PATCH /users/{user_id}/deactivate
///
/// Soft-deletes a user. Existing records are kept; the account can no
/// longer log in or act.
pub async fn deactivate_user(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users().deactivate(user_id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::from(user),
            "User deactivated",
        )),
    ))
}
