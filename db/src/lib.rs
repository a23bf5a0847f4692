pub mod models;
pub mod repositories;
pub mod test_utils;


use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use util::paths;

/// Opens the connection pool for `path_or_url`.
///
/// A DSN is used as-is; a bare file path is treated as a SQLite database whose
/// parent directory is created if missing. The returned handle is cheap to
/// clone and is meant to be passed down to whoever needs storage.
pub async fn connect(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    let url = paths::database_url(path_or_url);
    if url.starts_with("sqlite://") {
        if let Some(file) = url
            .strip_prefix("sqlite://")
            .and_then(|rest| rest.split('?').next())
        {
            paths::ensure_parent_dir(file)
                .map_err(|e| DbErr::Custom(format!("cannot create database directory: {e}")))?;
        }
    }

    let mut opts = ConnectOptions::new(url);
    opts.connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    tracing::info!(target: "db", "Connecting to database");
    Database::connect(opts).await
}
