//! Test helpers for generating unique test data
//!
//! ULID-suffixed values keep tests isolated when they share a database.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address in the format `{prefix}-{ulid}@example.test`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email1 = unique_email("test");
/// let email2 = unique_email("test");
/// assert_ne!(email1, email2);
/// assert!(email1.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
