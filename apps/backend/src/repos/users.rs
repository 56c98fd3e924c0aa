//! Credential store: user repository functions (generic over ConnectionTrait).
//!
//! Every email entering this module is normalized first, so lookups are
//! case-insensitive exact matches against the normalized column.

use sea_orm::ConnectionTrait;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::adapters::users_sea::{self as users_adapter, PasswordUpdate};
use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::utils::email::normalize_email;

pub use crate::adapters::users_sea::UserCreate;
pub use crate::adapters::users_sea::UserProfileUpdate as ProfilePatch;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            date_of_birth: model.date_of_birth,
            gender: model.gender,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, &normalize_email(email)).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, id).await?;
    Ok(user.map(User::from))
}

/// Insert a user. A duplicate (normalized) email surfaces as
/// `Conflict(UniqueEmail)` from the unique index.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut dto: UserCreate,
) -> Result<User, DomainError> {
    dto.email = normalize_email(&dto.email);
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    patch: ProfilePatch,
) -> Result<Option<User>, DomainError> {
    let Some(existing) = users_adapter::find_by_email(conn, &normalize_email(email)).await? else {
        return Ok(None);
    };
    let updated = users_adapter::update_profile(conn, existing, patch).await?;
    Ok(Some(User::from(updated)))
}

pub async fn update_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password_hash: String,
) -> Result<Option<User>, DomainError> {
    let Some(existing) = users_adapter::find_by_email(conn, &normalize_email(email)).await? else {
        return Ok(None);
    };
    let updated = users_adapter::update_password(
        conn,
        PasswordUpdate {
            id: existing.id,
            password_hash,
        },
    )
    .await?;
    Ok(Some(User::from(updated)))
}

/// Delete the user with `email`, returning the removed row.
pub async fn delete_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let Some(existing) = users_adapter::find_by_email(conn, &normalize_email(email)).await? else {
        return Ok(None);
    };
    users_adapter::delete_by_id(conn, existing.id).await?;
    Ok(Some(User::from(existing)))
}
