use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure taxonomy shared by every service.
///
/// Each variant maps to one HTTP status at the API edge; the mapping lives in
/// the `api` crate so that services stay transport agnostic.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Validation(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl ServiceError {
    /// Stable, machine readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::InvalidState(_) => "invalid_state",
            ServiceError::Permission(_) => "permission",
            ServiceError::Auth(_) => "auth",
            ServiceError::Validation(_) => "validation",
            ServiceError::Unavailable(_) => "unavailable",
            ServiceError::Database(_) => "database",
        }
    }
}

/// True when the error is the store rejecting a duplicate key.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        if is_unique_violation(&err) {
            return ServiceError::Conflict(err.to_string());
        }
        match err {
            DbErr::ConnectionAcquire(e) => ServiceError::Unavailable(e.to_string()),
            DbErr::Conn(e) => ServiceError::Unavailable(e.to_string()),
            DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Database(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
