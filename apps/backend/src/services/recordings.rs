//! Upload and listing of meeting recordings.

use bytes::Bytes;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::claims::BackendClaims;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::recordings::{self as recordings_repo, Recording, RecordingCreate};
use crate::repos::users::{self as users_repo, User};
use crate::services::validation::require_text;
use crate::storage::{BlobStore, BlobStoreError};
use crate::utils::object_key::build_object_key;

#[derive(Debug, Clone)]
pub struct Upload {
    pub meeting_title: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// The caller's own user row; a subject that no longer exists is 404.
async fn subject_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: &BackendClaims,
) -> Result<User, AppError> {
    let not_found = || DomainError::not_found(NotFoundKind::User, "User not found");
    let id = Uuid::parse_str(&subject.sub).map_err(|_| not_found())?;
    let user = users_repo::find_by_id(conn, id).await?.ok_or_else(not_found)?;
    Ok(user)
}

fn map_blob_err(e: BlobStoreError) -> AppError {
    match e {
        BlobStoreError::InvalidKey(_) => {
            AppError::invalid(ErrorCode::InvalidUpload, "File name is not usable")
        }
        BlobStoreError::AlreadyExists(_) => DomainError::conflict(
            ConflictKind::UniqueObjectKey,
            "A recording with this file name was uploaded in the same second",
        )
        .into(),
        BlobStoreError::Io(io) => DomainError::infra(InfraErrorKind::Storage, io.to_string()).into(),
    }
}

/// Store the blob, then its metadata. The store never replaces an existing
/// object, so a blob that `put` accepted belongs to this call and is removed
/// again if the metadata insert fails.
pub async fn upload<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    blob_store: &dyn BlobStore,
    subject: &BackendClaims,
    upload: Upload,
    now: OffsetDateTime,
) -> Result<(Recording, String), AppError> {
    if upload.data.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidUpload,
            "No file uploaded",
        ));
    }
    let meeting_title = require_text("meetingTitle", &upload.meeting_title, ErrorCode::InvalidUpload)?;
    let file_name = require_text("fileName", &upload.file_name, ErrorCode::InvalidUpload)?;

    let user = subject_user(conn, subject).await?;
    let object_key = build_object_key(&user.email, now, &file_name)?;
    let size_bytes = upload.data.len() as i64;

    let location = blob_store
        .put(&object_key, upload.data, upload.content_type.as_deref())
        .await
        .map_err(map_blob_err)?;

    let created = recordings_repo::create_recording(
        conn,
        RecordingCreate {
            user_id: user.id,
            email: user.email.clone(),
            meeting_title,
            original_file_name: file_name,
            object_key: object_key.clone(),
            content_type: upload.content_type,
            size_bytes,
        },
    )
    .await;

    match created {
        Ok(recording) => {
            info!(
                recording_id = %recording.id,
                object_key = %Redacted(&object_key),
                size_bytes,
                "recording uploaded"
            );
            Ok((recording, location))
        }
        Err(e) => {
            if let Err(cleanup) = blob_store.delete(&object_key).await {
                warn!(
                    object_key = %Redacted(&object_key),
                    error = %cleanup,
                    "failed to remove orphaned blob"
                );
            }
            Err(e.into())
        }
    }
}

/// The caller's recordings, newest first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: &BackendClaims,
) -> Result<Vec<Recording>, AppError> {
    let user = subject_user(conn, subject).await?;
    Ok(recordings_repo::list_for_user(conn, user.id).await?)
}
