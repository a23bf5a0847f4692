use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use db::models::user::{Model, Role};
use serde::{Deserialize, Serialize};
use services::user_service::RegisterUser;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub role: Role,

    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,

    #[validate(length(min = 1, max = 100, message = "Department is required"))]
    pub department: String,

    pub enrollment_number: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

fn issue(state: &AppState, user: Model) -> Result<AuthResponse, ApiError> {
    let issued = state.identity().issue(&user)?;
    Ok(AuthResponse {
        user: UserResponse::from(user),
        token: issued.token,
        expires_at: issued.expires_at,
    })
}

/// POST /auth/register
///
/// Registers a student (with `enrollment_number`) or a teacher (with
/// `employee_id`) and returns a token for the new account.
///
/// ### Request Body
/// ```json
/// {
///   "role": "student",
///   "username": "alice",
///   "email": "alice@campus.edu",
///   "password": "strongpassword",
///   "display_name": "Alice",
///   "department": "Computer Science",
///   "enrollment_number": "CS-2025-001"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ user, token, expires_at }`
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` when username, email, or institution id is taken
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let user = state
        .users()
        .register(RegisterUser {
            role: req.role,
            username: req.username,
            email: req.email,
            password: req.password,
            display_name: req.display_name,
            department: req.department,
            enrollment_number: req.enrollment_number,
            employee_id: req.employee_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            issue(&state, user)?,
            "User registered successfully",
        )),
    ))
}

/// POST /auth/login
///
/// ### Responses
/// - `200 OK` with `{ user, token, expires_at }`
/// - `401 Unauthorized` for unknown users, wrong passwords, and deactivated accounts
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let user = state
        .users()
        .verify_credentials(&req.username, &req.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(issue(&state, user)?, "Login successful")),
    ))
}
