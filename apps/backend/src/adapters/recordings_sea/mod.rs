//! SeaORM adapter for recording metadata.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::recordings;

pub mod dto;

pub use dto::RecordingCreate;

pub async fn create_recording<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RecordingCreate,
) -> Result<recordings::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let recording = recordings::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(dto.user_id),
        email: Set(dto.email),
        meeting_title: Set(dto.meeting_title),
        original_file_name: Set(dto.original_file_name),
        object_key: Set(dto.object_key),
        content_type: Set(dto.content_type),
        size_bytes: Set(dto.size_bytes),
        created_at: Set(now),
        updated_at: Set(now),
    };

    recording.insert(conn).await
}

/// Newest first.
pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<recordings::Model>, sea_orm::DbErr> {
    recordings::Entity::find()
        .filter(recordings::Column::UserId.eq(user_id))
        .order_by_desc(recordings::Column::CreatedAt)
        .order_by_desc(recordings::Column::Id)
        .all(conn)
        .await
}

/// Case-insensitive match on `object_key`.
pub async fn find_by_object_key_ci<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    object_key: &str,
) -> Result<Option<recordings::Model>, sea_orm::DbErr> {
    recordings::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col((
                recordings::Entity,
                recordings::Column::ObjectKey,
            ))))
            .eq(object_key.to_lowercase()),
        )
        .one(conn)
        .await
}

pub async fn delete_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = recordings::Entity::delete_many()
        .filter(recordings::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
