use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::ApiResponse;
use crate::routes::common::AttendanceRecordResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct MarkAttendanceRequest {
    #[validate(range(min = 1, message = "session_id must be positive"))]
    pub session_id: i64,
}

/// POST /attendance/mark
///
/// Marks the calling student present in an active session. Marking again
/// returns the existing record.
///
/// ### Responses
/// - `200 OK` with the record
/// - `400 Bad Request` if the session has ended
/// - `404 Not Found` if the session does not exist
pub async fn mark_attendance(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(req): JsonBody<MarkAttendanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let record = state
        .attendance()
        .mark_attendance(req.session_id, claims.sub)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            AttendanceRecordResponse::from(record),
            "Attendance marked",
        )),
    ))
}
