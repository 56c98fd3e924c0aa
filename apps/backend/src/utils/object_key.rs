//! Object keys for uploaded recordings: `{email}_{YYYY-MM-DD_HH-MM-SS}_{file}`.

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::AppError;

/// Build the object key for a recording uploaded by `email` at `at` (UTC).
pub fn build_object_key(
    email: &str,
    at: OffsetDateTime,
    original_file_name: &str,
) -> Result<String, AppError> {
    let stamp = at
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]_[hour]-[minute]-[second]"
        ))
        .map_err(|e| AppError::internal(format!("Failed to format upload timestamp: {e}")))?;
    Ok(format!("{email}_{stamp}_{original_file_name}"))
}
