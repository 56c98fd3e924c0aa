//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Version};

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

fn hasher(security: &SecurityConfig) -> Argon2<'static> {
    Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        security.password_params.clone(),
    )
}

/// Hash `plain` with a fresh random salt into a PHC string.
pub fn hash_password(plain: &str, security: &SecurityConfig) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher(security)
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check `plain` against a stored PHC string. A mismatch is `Ok(false)`;
/// a stored hash that cannot be parsed is an internal error.
pub fn verify_password(
    plain: &str,
    stored: &str,
    security: &SecurityConfig,
) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| AppError::internal(format!("Stored password hash is unreadable: {e}")))?;
    Ok(hasher(security)
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// [`hash_password`] on the blocking pool; argon2 is deliberately slow.
pub async fn hash_password_blocking(
    plain: String,
    security: SecurityConfig,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&plain, &security))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(
    plain: String,
    stored: String,
    security: SecurityConfig,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &stored, &security))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
}
