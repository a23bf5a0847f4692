use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::PathParam;
use crate::response::ApiResponse;
use crate::routes::common::DeviceResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// DELETE /devices/{device_id}
///
/// Releases the caller's binding of a device. The ended binding is returned
/// and stays in the history.
pub async fn unbind_device(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    PathParam(device_id): PathParam<String>,
) -> Result<impl IntoResponse, ApiError> {
    let binding = state.devices().unbind_device(&device_id, claims.sub).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            DeviceResponse::from(binding),
            "Device unbound",
        )),
    ))
}
