use crate::response::{ErrorResponse, format_validation_errors};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::ServiceError;
use validator::ValidationErrors;

/// Error type returned by every handler and guard.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(ServiceError::Auth(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(ServiceError::Permission(message.into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(ServiceError::Validation(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::InvalidState(_) => StatusCode::BAD_REQUEST,
            ServiceError::Permission(_) => StatusCode::FORBIDDEN,
            ServiceError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::bad_request(format_validation_errors(&errors))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, kind = self.0.kind(), "request failed");
            match &self.0 {
                ServiceError::Unavailable(_) => "Service temporarily unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.0.to_string()
        };

        let body = ErrorResponse {
            success: false,
            error: self.0.kind(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
