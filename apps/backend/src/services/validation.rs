//! Input shape checks shared by the user and mail flows.

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::email::is_valid_email;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MAX_CHARS: usize = 128;
pub const GENDERS: [&str; 3] = ["male", "female", "other"];

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(AppError::invalid(
            ErrorCode::InvalidEmail,
            "Email must look like name@domain.tld",
        ))
    }
}

/// Trimmed name, 3 to 50 characters.
pub fn validate_name(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(AppError::invalid(
            ErrorCode::InvalidName,
            format!("{field} must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if len == 0 || len > PASSWORD_MAX_CHARS {
        return Err(AppError::invalid(
            ErrorCode::InvalidPassword,
            format!("Password must be between 1 and {PASSWORD_MAX_CHARS} characters"),
        ));
    }
    Ok(())
}

/// Lowercased gender, one of `male`, `female`, `other`.
pub fn validate_gender(gender: &str) -> Result<String, AppError> {
    let normalized = gender.trim().to_lowercase();
    if GENDERS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(AppError::invalid(
            ErrorCode::InvalidGender,
            "Gender must be one of male, female, other",
        ))
    }
}

/// Non-blank string field.
pub fn require_text(field: &str, value: &str, code: ErrorCode) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid(code, format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
