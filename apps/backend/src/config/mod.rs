pub mod app;
pub mod db;
pub mod mail;
pub mod storage;

use std::env;

use crate::error::AppError;

/// Required environment variable, or a config error naming it.
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Optional environment variable; blank values count as unset.
pub(crate) fn opt_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
