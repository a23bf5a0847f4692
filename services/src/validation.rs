use crate::error::{ServiceError, ServiceResult};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").unwrap());
static INSTITUTION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9-]{5,20}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_DEVICE_ID_LEN: usize = 128;
pub const MAX_DEVICE_LABEL_LEN: usize = 100;

pub fn username(value: &str) -> ServiceResult<()> {
    if USERNAME_RE.is_match(value) {
        Ok(())
    } else {
        Err(ServiceError::Validation(
            "Username must be 3-32 characters of letters, digits, '_', '.' or '-'".into(),
        ))
    }
}

pub fn email(value: &str) -> ServiceResult<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ServiceError::Validation("Invalid email format".into()))
    }
}

pub fn password(value: &str) -> ServiceResult<()> {
    if value.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )))
    }
}

/// Enrollment numbers and employee ids share one format.
pub fn institution_id(field: &str, value: &str) -> ServiceResult<()> {
    if INSTITUTION_ID_RE.is_match(value) {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "{field} must be 5-20 characters of A-Z, 0-9 or '-'"
        )))
    }
}

pub fn non_blank(field: &str, value: &str, max: usize) -> ServiceResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(ServiceError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
