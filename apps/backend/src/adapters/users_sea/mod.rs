//! SeaORM adapter for user repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::users;

pub mod dto;

pub use dto::{PasswordUpdate, UserCreate, UserProfileUpdate};

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id).one(conn).await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        date_of_birth: Set(dto.date_of_birth),
        gender: Set(dto.gender),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

/// Apply the set fields of `dto` to `existing`; other columns are untouched.
pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: users::Model,
    dto: UserProfileUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    if dto.is_empty() {
        return Ok(existing);
    }

    let mut user = existing.into_active_model();
    if let Some(first_name) = dto.first_name {
        user.first_name = Set(first_name);
    }
    if let Some(last_name) = dto.last_name {
        user.last_name = Set(last_name);
    }
    if let Some(date_of_birth) = dto.date_of_birth {
        user.date_of_birth = Set(date_of_birth);
    }
    if let Some(gender) = dto.gender {
        user.gender = Set(gender);
    }
    user.updated_at = Set(time::OffsetDateTime::now_utc());

    user.update(conn).await
}

pub async fn update_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PasswordUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user = users::ActiveModel {
        id: Set(dto.id),
        email: NotSet,
        password_hash: Set(dto.password_hash),
        first_name: NotSet,
        last_name: NotSet,
        date_of_birth: NotSet,
        gender: NotSet,
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    user.update(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = users::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
