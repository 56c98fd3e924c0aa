//! Storage-agnostic failures raised by repos and services.
//!
//! Handlers return `AppError`; `From<DomainError> for AppError` decides the
//! HTTP status and public error code.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfraErrorKind {
    DbUnavailable,
    Db,
    Storage,
    Mail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    User,
    Recording,
    /// A row the caller addressed directly (SeaORM `RecordNotFound`).
    Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    UniqueEmail,
    UniqueObjectKey,
    /// Unique violation on a constraint we do not name.
    Unique,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("conflict ({0:?}): {1}")]
    Conflict(ConflictKind, String),
    #[error("{0:?} not found: {1}")]
    NotFound(NotFoundKind, String),
    #[error("infrastructure failure ({0:?}): {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
