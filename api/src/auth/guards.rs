use crate::auth::claims::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use db::models::user::Role;

/// Authenticates the request and stores the `AuthUser` in its extensions.
async fn extract_and_insert_authuser(
    app_state: &AppState,
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, app_state).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Any valid token.
pub async fn allow_authenticated(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, _user) = extract_and_insert_authuser(&app_state, req).await?;
    Ok(next.run(req).await)
}

pub async fn allow_admin(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(&app_state, req).await?;
    if !user.0.admin {
        return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(next.run(req).await)
}

async fn allow_role(
    app_state: AppState,
    req: Request<Body>,
    next: Next,
    role: Role,
    failure_msg: &str,
) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(&app_state, req).await?;
    if user.0.role != role {
        return Err(ApiError::forbidden(failure_msg));
    }
    Ok(next.run(req).await)
}

pub async fn allow_teacher(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    allow_role(app_state, req, next, Role::Teacher, "Teacher access required").await
}

pub async fn allow_student(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    allow_role(app_state, req, next, Role::Student, "Student access required").await
}
