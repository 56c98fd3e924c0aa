//! Process-level settings for the HTTP server.

use std::env;

use super::must_var;
use super::mail::MailConfig;
use super::storage::BlobStoreConfig;
use crate::error::AppError;

/// Upper bound for a single uploaded recording.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub max_upload_bytes: usize,
    pub storage: BlobStoreConfig,
    pub mail: MailConfig,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::config("BACKEND_JWT_SECRET must not be empty"));
        }

        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                AppError::config(format!(
                    "MAX_UPLOAD_BYTES must be a positive integer, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            max_upload_bytes,
            storage: BlobStoreConfig::from_env(),
            mail: MailConfig::from_env(),
        })
    }
}
