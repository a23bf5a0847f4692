use crate::error::ApiError;
use crate::extract::PathParam;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users().get(user_id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::from(user),
            "User retrieved successfully",
        )),
    ))
}
