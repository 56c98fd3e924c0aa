//! Error codes for the Minutes backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No bearer token on a protected call
    NoToken,
    /// Token failed signature, decoding or expiry checks
    InvalidToken,
    /// Wrong password for an existing account
    InvalidCredentials,
    /// Authenticated subject does not own the resource
    Forbidden,

    // Request Validation
    /// Invalid email address
    InvalidEmail,
    /// Invalid first/last name
    InvalidName,
    /// Invalid or empty password
    InvalidPassword,
    /// Invalid gender value
    InvalidGender,
    /// Invalid upload (empty body, missing title or file name)
    InvalidUpload,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Recording not found
    RecordingNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Email already registered
    UniqueEmail,
    /// Another recording already uses the object key
    RecordingExists,
    /// Generic conflict (fallback for unmatched unique violations)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Blob store write failed
    StorageError,
    /// Mail delivery failed
    MailError,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoToken => "NO_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidGender => "INVALID_GENDER",
            Self::InvalidUpload => "INVALID_UPLOAD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecordingNotFound => "RECORDING_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::RecordingExists => "RECORDING_EXISTS",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::StorageError => "STORAGE_ERROR",
            Self::MailError => "MAIL_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
