use crate::auth::claims::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};

/// Resolves the caller from the `Authorization: Bearer` header.
///
/// When a guard already authenticated the request, the `AuthUser` it stored
/// in the extensions is reused and the token is not decoded again.
///
/// # Errors
/// `401 Unauthorized` if the header is missing, malformed, or the token is
/// rejected by the identity provider.
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Missing or invalid Authorization header"))?;

        let app_state = AppState::from_ref(state);
        let claims = app_state.identity().authenticate(bearer.token())?;
        Ok(AuthUser(claims))
    }
}
