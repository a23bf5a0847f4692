pub mod attendance_service;
pub mod device_service;
pub mod error;
pub mod identity;
pub mod service;
pub mod session_service;
pub mod user_service;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ServiceError, ServiceResult};
