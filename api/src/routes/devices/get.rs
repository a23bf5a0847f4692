use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::PathParam;
use crate::response::ApiResponse;
use crate::routes::common::DeviceResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// GET /devices
///
/// The caller's binding history, newest first.
pub async fn list_devices(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let devices: Vec<DeviceResponse> = state
        .devices()
        .list_devices(claims.sub)
        .await?
        .into_iter()
        .map(DeviceResponse::from)
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(devices, "Devices retrieved")),
    ))
}

/// GET /devices/{device_id}
///
/// The live binding of a device. Only its owner or an admin may look.
pub async fn get_device(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    PathParam(device_id): PathParam<String>,
) -> Result<impl IntoResponse, ApiError> {
    let binding = state.devices().get_device(&device_id).await?;
    if binding.user_id != claims.sub && !claims.admin {
        return Err(ApiError::forbidden("Device is bound to another user"));
    }

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            DeviceResponse::from(binding),
            "Device retrieved",
        )),
    ))
}
