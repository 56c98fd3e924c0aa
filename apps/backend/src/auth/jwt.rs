use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::auth::claims::BackendClaims;
use crate::state::security_config::{SecurityConfig, ACCESS_TOKEN_TTL_SECS};
use crate::AppError;

/// Why a presented token was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// Bad signature, wrong algorithm, unparseable or missing claims
    #[error("malformed")]
    Malformed,
    #[error("expired")]
    Expired,
}

/// Mint an HS256 access token for `sub`, expiring 24 hours after `now`.
pub fn mint_access_token(
    sub: &str,
    email: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("System clock is before the Unix epoch"))?
        .as_secs() as i64;

    let claims = BackendClaims {
        sub: sub.to_string(),
        email: email.to_string(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<BackendClaims, VerificationError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<BackendClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => VerificationError::Expired,
        _ => VerificationError::Malformed,
    })
}
