//! Meeting summary delivery.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::auth::authorize::ensure_owner;
use crate::auth::claims::BackendClaims;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::mail::{MailMessage, Mailer};
use crate::repos::recordings as recordings_repo;
use crate::repos::users as users_repo;
use crate::services::validation::require_text;

pub fn summary_subject(meeting_title: &str) -> String {
    format!("Summary for Meeting: {meeting_title}")
}

fn summary_body(first_name: &str, message: &str) -> String {
    format!("Hi {first_name},\n\n{message}\n")
}

/// Mail `message` to the owner of the recording at `object_key`.
/// The caller must own that recording.
pub async fn send_summary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mailer: &dyn Mailer,
    subject: &BackendClaims,
    object_key: &str,
    message: &str,
) -> Result<(), AppError> {
    let object_key = require_text("objectKey", object_key, ErrorCode::ValidationError)?;
    let message = require_text("message", message, ErrorCode::ValidationError)?;

    let recording = recordings_repo::find_by_object_key(conn, &object_key)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Recording,
                "No recording found for the given object key",
            )
        })?;
    let owner = users_repo::find_by_id(conn, recording.user_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::User, "No user found for the recording")
        })?;
    ensure_owner(&subject.sub, &owner.id.to_string(), &recording.object_key)?;

    let mail = MailMessage {
        from: mailer.from_address().to_string(),
        to: owner.email.clone(),
        subject: summary_subject(&recording.meeting_title),
        text: summary_body(&owner.first_name, &message),
    };
    mailer
        .send(mail)
        .await
        .map_err(|e| DomainError::infra(InfraErrorKind::Mail, e.to_string()))?;

    info!(
        recording_id = %recording.id,
        to = %Redacted(&owner.email),
        "summary mail sent"
    );
    Ok(())
}
