use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::QueryParams;
use crate::response::ApiResponse;
use crate::routes::common::AttendanceRecordResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Role;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub session_id: i64,
    /// Defaults to the caller.
    pub student_id: Option<i64>,
}

/// GET /attendance/status?session_id=&student_id=
///
/// Students may only ask about themselves.
pub async fn get_attendance_status(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    QueryParams(query): QueryParams<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let student_id = query.student_id.unwrap_or(claims.sub);
    if claims.role == Role::Student && student_id != claims.sub && !claims.admin {
        return Err(ApiError::forbidden(
            "Students can only view their own attendance",
        ));
    }

    let status = state
        .attendance()
        .get_attendance_status(query.session_id, student_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(status, "Attendance status retrieved")),
    ))
}

/// GET /attendance/history
///
/// Every record of the calling student, newest first.
pub async fn get_attendance_history(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let records: Vec<AttendanceRecordResponse> = state
        .attendance()
        .list_student_attendance(claims.sub)
        .await?
        .into_iter()
        .map(AttendanceRecordResponse::from)
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(records, "Attendance history retrieved")),
    ))
}
