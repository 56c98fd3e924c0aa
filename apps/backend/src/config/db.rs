use std::env;

use super::must_var;
use crate::error::AppError;

/// Which database the process talks to.
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// PostgreSQL configured from the environment
    Postgres,
    /// Private in-memory SQLite database, migrated on connect (tests)
    InMemory,
}

/// Builds a database URL for the given profile.
///
/// `DATABASE_URL` wins when set; otherwise the Postgres URL is assembled from
/// `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_DB`, `POSTGRES_USER` and
/// `POSTGRES_PASSWORD`.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::Postgres => {
            if let Ok(url) = env::var("DATABASE_URL") {
                if !url.trim().is_empty() {
                    return Ok(url);
                }
            }
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("POSTGRES_DB")?;
            let username = must_var("POSTGRES_USER")?;
            let password = must_var("POSTGRES_PASSWORD")?;

            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}
