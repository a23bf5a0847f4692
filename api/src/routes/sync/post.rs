use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use services::attendance_service::SyncRecord;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SyncAttendanceRequest {
    #[validate(length(min = 1, max = 128, message = "device_id must be 1-128 characters"))]
    pub device_id: String,

    pub records: Vec<SyncRecord>,
}

/// POST /sync/attendance
///
/// Uploads marks captured while the device was offline. Records are judged
/// one by one; the response lists how many were accepted and why each
/// rejected record failed.
///
/// ### Request Body
/// ```json
/// {
///   "device_id": "a1b2c3",
///   "records": [{ "session_id": 4, "captured_at": "2025-09-08T10:05:00Z" }]
/// }
/// ```
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "accepted": 1,
///     "rejected": [
///       { "record": { ... }, "kind": "invalid_state", "reason": "..." }
///     ]
///   },
///   "message": "Synced 1 of 2 records"
/// }
/// ```
/// - `400 Bad Request` for an empty batch or one larger than 500 records
pub async fn sync_attendance(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(req): JsonBody<SyncAttendanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let total = req.records.len();
    let outcome = state
        .attendance()
        .sync_attendance_batch(&req.device_id, claims.sub, req.records)
        .await?;

    let message = format!("Synced {} of {} records", outcome.accepted, total);
    Ok((StatusCode::OK, Json(ApiResponse::success(outcome, message))))
}
