//! Security-relevant log events with a stable `event` field.

use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A bearer token was accepted.
pub fn token_accepted(email: &str) {
    info!(
        event = "SECURITY_TOKEN_ACCEPTED",
        trace_id = %trace_ctx::trace_id(),
        email = %Redacted(email),
        "Authenticated request"
    );
}

/// A protected call arrived without a usable bearer token.
pub fn token_missing(peer: &str) {
    warn!(
        event = "SECURITY_TOKEN_MISSING",
        trace_id = %trace_ctx::trace_id(),
        peer,
        "No token provided"
    );
}

/// A bearer token failed verification; `reason` is `malformed` or `expired`.
pub fn token_rejected(peer: &str, reason: &str) {
    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        trace_id = %trace_ctx::trace_id(),
        peer,
        reason,
        "Failed to authenticate token"
    );
}

/// An authenticated subject tried to act on a resource it does not own.
pub fn access_denied(subject: &str, resource: &str) {
    warn!(
        event = "SECURITY_ACCESS_DENIED",
        trace_id = %trace_ctx::trace_id(),
        subject,
        resource = %Redacted(resource),
        "Identity does not own the requested resource"
    );
}

/// Login failed for a known reason (unknown email, bad password).
pub fn login_failed(reason: &str, email: &str) {
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        trace_id = %trace_ctx::trace_id(),
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}
