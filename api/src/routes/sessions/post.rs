use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::ApiResponse;
use crate::routes::common::SessionResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use services::session_service::OpenSession;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct StartSessionRequest {
    #[validate(range(min = 1, message = "course_id must be positive"))]
    pub course_id: i64,

    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,
}

/// POST /sessions/start
///
/// Opens an attendance session for a course, owned by the calling teacher.
///
/// ### Request Body
/// ```json
/// { "course_id": 12, "title": "Week 3 lecture" }
/// ```
///
/// ### Responses
/// - `201 Created` with the session
/// - `409 Conflict` if the course already has an active session
pub async fn start_session(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(req): JsonBody<StartSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let session = state
        .sessions()
        .open_session(OpenSession {
            teacher_id: claims.sub,
            course_id: req.course_id,
            title: req.title,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SessionResponse::from(session),
            "Session started",
        )),
    ))
}
