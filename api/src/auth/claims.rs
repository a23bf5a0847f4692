pub use services::identity::Claims;

/// Authenticated caller, placed in request extensions by the guards.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
