use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{PathParam, QueryParams};
use crate::response::ApiResponse;
use crate::routes::common::{AttendanceRecordResponse, SessionResponse};
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ActiveSessionQuery {
    pub course_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListSessionsQuery {
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

/// GET /sessions/active?course_id=
pub async fn get_active_session(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ActiveSessionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sessions().get_active_session(query.course_id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            SessionResponse::from(session),
            "Active session retrieved",
        )),
    ))
}

/// GET /sessions?course_id=&teacher_id=
///
/// Newest first. Both filters are optional.
pub async fn list_sessions(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListSessionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions: Vec<SessionResponse> = state
        .sessions()
        .list_sessions(query.course_id, query.teacher_id)
        .await?
        .into_iter()
        .map(SessionResponse::from)
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(sessions, "Sessions retrieved")),
    ))
}

/// GET /sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    PathParam(session_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sessions().get_session(session_id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            SessionResponse::from(session),
            "Session retrieved",
        )),
    ))
}

/// GET /sessions/{session_id}/records
///
/// The roster of a session. Only the owning teacher may read it.
pub async fn get_session_records(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    PathParam(session_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let records: Vec<AttendanceRecordResponse> = state
        .attendance()
        .list_session_attendance(session_id, claims.sub)
        .await?
        .into_iter()
        .map(AttendanceRecordResponse::from)
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(records, "Attendance records retrieved")),
    ))
}
