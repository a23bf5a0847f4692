//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.
//!
//! The configuration only carries plain values. Long-lived resources such as the
//! database pool are built from it at startup and passed down explicitly.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// How long after a session ends offline-captured marks are still accepted.
    pub sync_grace_minutes: u64,
    /// Seconds for one client to earn back one request token. `0` disables limiting.
    pub rate_limit_seconds: u64,
    /// Requests a client may make back to back. `0` disables limiting.
    pub rate_burst: u32,
    /// Values that could not be used as given.
    pub issues: Vec<String>,
}

/// Upper bound for `SYNC_GRACE_MINUTES`: one week.
pub const MAX_SYNC_GRACE_MINUTES: u64 = 7 * 24 * 60;

/// Upper bound for `JWT_DURATION_MINUTES`: one year.
pub const MAX_JWT_DURATION_MINUTES: u64 = 365 * 24 * 60;

/// Upper bound for `RATE_LIMIT_SECONDS`: one day.
pub const MAX_RATE_LIMIT_SECONDS: u64 = 24 * 60 * 60;

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads numeric values, remembering every one that had to be replaced by
/// its default.
#[derive(Default)]
struct Loader {
    issues: Vec<String>,
}

impl Loader {
    fn parsed_or<T>(&mut self, key: &str, default: T) -> T
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        match env::var(key) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                self.issues
                    .push(format!("{key}={raw:?} is not a valid number, using {default}"));
                default
            }),
            Err(_) => default,
        }
    }

    /// Like `parsed_or`, but values above `max` are also replaced by `default`.
    fn bounded_or(&mut self, key: &str, default: u64, max: u64) -> u64 {
        let value = self.parsed_or(key, default);
        if value > max {
            self.issues
                .push(format!("{key}={value} exceeds {max}, using {default}"));
            return default;
        }
        value
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing values fall back to development defaults. Malformed or
    /// out-of-range numbers are replaced by their defaults and listed in
    /// `issues`; see [`report_issues`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut load = Loader::default();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "campus-attendance"),
            log_level: var_or("LOG_LEVEL", "api=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false").eq_ignore_ascii_case("true"),
            database_path: var_or("DATABASE_PATH", "data/dev.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: load.parsed_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_duration_minutes: load.bounded_or(
                "JWT_DURATION_MINUTES",
                60,
                MAX_JWT_DURATION_MINUTES,
            ),
            sync_grace_minutes: load.bounded_or(
                "SYNC_GRACE_MINUTES",
                15,
                MAX_SYNC_GRACE_MINUTES,
            ),
            rate_limit_seconds: load.bounded_or(
                "RATE_LIMIT_SECONDS",
                60,
                MAX_RATE_LIMIT_SECONDS,
            ),
            rate_burst: load.parsed_or("RATE_BURST", 100),
            issues: load.issues,
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// A poisoned lock is recovered rather than propagated; the config holds
    /// plain values so a panicking writer cannot leave it half-updated.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    /// Clamped to [`MAX_JWT_DURATION_MINUTES`].
    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| {
            cfg.jwt_duration_minutes = value.min(MAX_JWT_DURATION_MINUTES)
        });
    }

    /// Clamped to [`MAX_SYNC_GRACE_MINUTES`].
    pub fn set_sync_grace_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.sync_grace_minutes = value.min(MAX_SYNC_GRACE_MINUTES));
    }

    /// Clamped to [`MAX_RATE_LIMIT_SECONDS`].
    pub fn set_rate_limit_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.rate_limit_seconds = value.min(MAX_RATE_LIMIT_SECONDS));
    }

    pub fn set_rate_burst(value: u32) {
        AppConfig::set_field(|cfg| cfg.rate_burst = value);
    }
}

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn sync_grace_minutes() -> u64 {
    AppConfig::global().sync_grace_minutes
}

pub fn rate_limit_seconds() -> u64 {
    AppConfig::global().rate_limit_seconds
}

pub fn rate_burst() -> u32 {
    AppConfig::global().rate_burst
}

/// Logs every value the loaded configuration had to replace.
///
/// Loading can happen before a subscriber is installed, so the binary calls
/// this once logging is up.
pub fn report_issues() {
    for issue in &AppConfig::global().issues {
        tracing::warn!(%issue, "Invalid config value");
    }
}
