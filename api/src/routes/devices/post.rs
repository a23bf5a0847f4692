use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::ApiResponse;
use crate::routes::common::DeviceResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use services::device_service::BindDevice;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct BindDeviceRequest {
    #[validate(length(min = 1, max = 128, message = "device_id must be 1-128 characters"))]
    pub device_id: String,

    #[validate(length(min = 1, max = 100, message = "device_name must be 1-100 characters"))]
    pub device_name: String,

    #[validate(length(min = 1, max = 100, message = "device_model must be 1-100 characters"))]
    pub device_model: String,
}

/// POST /devices/bind
///
/// Binds a device to the caller. A device bound to someone else is moved
/// over, and the caller's previous device is released.
///
/// ### Responses
/// - `201 Created` with the new binding
pub async fn bind_device(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(req): JsonBody<BindDeviceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let binding = state
        .devices()
        .bind_device(BindDevice {
            user_id: claims.sub,
            device_id: req.device_id,
            device_name: req.device_name,
            device_model: req.device_model,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            DeviceResponse::from(binding),
            "Device bound",
        )),
    ))
}
