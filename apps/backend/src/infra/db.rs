use std::future::Future;
use std::process;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 1_000;

/// Retry a connection attempt with fixed interval delays.
/// Returns the result of the last attempt after all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::internal("connection retry made no attempts")))
}

fn connect_options(profile: &DbProfile, url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    match profile {
        // Every sqlite::memory: connection is its own database, so the pool
        // must hold exactly one connection for migrations to stay visible.
        DbProfile::InMemory => {
            opt.min_connections(1)
                .max_connections(1)
                .idle_timeout(Duration::from_secs(3600))
                .sqlx_logging(false);
        }
        DbProfile::Postgres => {
            opt.min_connections(1)
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(5))
                .sqlx_logging(false);
        }
    }
    opt
}

/// Open a pool for `profile`. Does NOT run migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile.clone())?;
    let attempts = match profile {
        DbProfile::InMemory => 1,
        DbProfile::Postgres => CONNECT_ATTEMPTS,
    };

    retry_connection(
        || {
            let opt = connect_options(&profile, &url);
            async move { Database::connect(opt).await.map_err(AppError::from) }
        },
        attempts,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await
}

/// Connect *and* bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    info!(profile = ?profile, pid = process::id(), "bootstrap=start");

    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;

    info!("bootstrap=ready");
    Ok(conn)
}
