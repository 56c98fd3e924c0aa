//! PII redaction for log fields.
//!
//! Emails keep their first character and domain; bearer tokens and other
//! opaque credentials (long base64/hex runs) are replaced outright.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

// JWT segments are base64url, so `-` and `_` are included alongside `+` and `/`.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9+/_\-]{16,}={0,2}(\.[A-Za-z0-9+/_\-]{4,}={0,2}){0,2}").unwrap()
});

/// Redact emails and token-like strings from `input`.
///
/// Emails are processed first so their local parts are not mistaken for
/// tokens.
pub fn redact(input: &str) -> String {
    let emails_masked = EMAIL_REGEX.replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.find('@') {
            Some(0) | None => full.to_string(),
            Some(at) => format!("{}***{}", &full[..1], &full[at..]),
        }
    });

    TOKEN_REGEX
        .replace_all(&emails_masked, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Wrapper that redacts its contents when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
