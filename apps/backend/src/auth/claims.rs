//! Claims carried by access tokens and attached to authenticated requests.

use serde::{Deserialize, Serialize};

/// Inserted into request extensions by the authentication middleware.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    /// Subject: the user id the token was issued for
    pub sub: String,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
