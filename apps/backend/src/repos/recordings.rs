//! Recording metadata repository.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::recordings_sea as recordings_adapter;
use crate::entities::recordings;
use crate::errors::domain::DomainError;

pub use crate::adapters::recordings_sea::RecordingCreate;

#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub meeting_title: String,
    pub original_file_name: String,
    pub object_key: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<recordings::Model> for Recording {
    fn from(model: recordings::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            email: model.email,
            meeting_title: model.meeting_title,
            original_file_name: model.original_file_name,
            object_key: model.object_key,
            content_type: model.content_type,
            size_bytes: model.size_bytes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn create_recording<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RecordingCreate,
) -> Result<Recording, DomainError> {
    let recording = recordings_adapter::create_recording(conn, dto).await?;
    Ok(Recording::from(recording))
}

/// Recordings owned by `user_id`, newest first.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<Recording>, DomainError> {
    let rows = recordings_adapter::list_by_user(conn, user_id).await?;
    Ok(rows.into_iter().map(Recording::from).collect())
}

/// Look up a recording by object key, ignoring case.
pub async fn find_by_object_key<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    object_key: &str,
) -> Result<Option<Recording>, DomainError> {
    let recording = recordings_adapter::find_by_object_key_ci(conn, object_key).await?;
    Ok(recording.map(Recording::from))
}

pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, DomainError> {
    Ok(recordings_adapter::delete_by_user(conn, user_id).await?)
}
