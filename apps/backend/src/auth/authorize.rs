//! Ownership check for identity-scoped resources.

use crate::error::AppError;
use crate::logging::security;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Forbidden,
}

/// Compare the identity bound to the request with the owner of a resource.
/// Identifiers are compared exactly; no normalization is applied.
pub fn authorize(bound_subject: &str, owner_id: &str) -> Authorization {
    if bound_subject == owner_id {
        Authorization::Authorized
    } else {
        Authorization::Forbidden
    }
}

/// [`authorize`], logging and mapping a mismatch to `FORBIDDEN`.
pub fn ensure_owner(bound_subject: &str, owner_id: &str, resource: &str) -> Result<(), AppError> {
    match authorize(bound_subject, owner_id) {
        Authorization::Authorized => Ok(()),
        Authorization::Forbidden => {
            security::access_denied(bound_subject, resource);
            Err(AppError::forbidden())
        }
    }
}
