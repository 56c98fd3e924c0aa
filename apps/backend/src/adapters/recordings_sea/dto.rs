//! DTOs for recordings_sea adapter.

use uuid::Uuid;

/// DTO for recording metadata written after the blob is stored.
#[derive(Debug, Clone)]
pub struct RecordingCreate {
    pub user_id: Uuid,
    pub email: String,
    pub meeting_title: String,
    pub original_file_name: String,
    pub object_key: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
}
