use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use services::user_service::UpdateProfile;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Department must be 1-100 characters"))]
    pub department: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// PUT /auth/me
///
/// Updates the caller's email, display name, department, or password.
/// Role, username, and institution ids cannot be changed.
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let user = state
        .users()
        .update_profile(
            claims.sub,
            UpdateProfile {
                email: req.email,
                display_name: req.display_name,
                department: req.department,
                password: req.password,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::from(user),
            "Profile updated successfully",
        )),
    ))
}
