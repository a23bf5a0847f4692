use crate::rate_limit::RateLimiter;
use chrono::Duration;
use sea_orm::DatabaseConnection;
use services::{
    attendance_service::AttendanceService,
    device_service::DeviceService,
    identity::{IdentityProvider, JwtIdentityProvider},
    session_service::SessionService,
    user_service::UserService,
};
use std::sync::Arc;

/// Shared handles for every request: the connection pool, the identity
/// provider, sync settings and the optional rate limiter. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    identity: Arc<dyn IdentityProvider>,
    sync_grace: Duration,
    rate_limiter: Option<RateLimiter>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        identity: Arc<dyn IdentityProvider>,
        sync_grace: Duration,
    ) -> Self {
        Self {
            db,
            identity,
            sync_grace,
            rate_limiter: None,
        }
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// State wired from `util::config`.
    pub fn from_config(db: DatabaseConnection) -> Self {
        let state = Self::new(
            db,
            Arc::new(JwtIdentityProvider::from_config()),
            sync_grace_from_config(),
        );
        match RateLimiter::from_config() {
            Some(limiter) => state.with_rate_limiter(limiter),
            None => state,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref()
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.db.clone())
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.db.clone())
    }

    pub fn attendance(&self) -> AttendanceService {
        AttendanceService::new(self.db.clone(), self.sync_grace)
    }

    pub fn devices(&self) -> DeviceService {
        DeviceService::new(self.db.clone())
    }
}

/// `SYNC_GRACE_MINUTES` as a duration. The config layer bounds it, so the
/// fallback only guards the conversion.
fn sync_grace_from_config() -> Duration {
    i64::try_from(util::config::sync_grace_minutes())
        .ok()
        .and_then(Duration::try_minutes)
        .unwrap_or_else(|| Duration::minutes(15))
}
