//! Account flows: registration, login and the owner-scoped profile operations.

use std::time::SystemTime;

use sea_orm::{ConnectionTrait, TransactionTrait};
use time::Date;
use tracing::{info, warn};

use crate::auth::authorize::ensure_owner;
use crate::auth::claims::BackendClaims;
use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::recordings as recordings_repo;
use crate::repos::users::{self as users_repo, ProfilePatch, User, UserCreate};
use crate::services::validation::{
    validate_email, validate_gender, validate_name, validate_password,
};
use crate::state::security_config::SecurityConfig;
use crate::storage::BlobStore;

#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: Date,
    pub gender: Option<String>,
}

/// Requested profile changes before validation.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
}

fn user_not_found() -> AppError {
    DomainError::not_found(NotFoundKind::User, "User not found").into()
}

fn issue_token(user: &User, security: &SecurityConfig) -> Result<String, AppError> {
    mint_access_token(
        &user.id.to_string(),
        &user.email,
        SystemTime::now(),
        security,
    )
}

/// Create an account and mint its first token.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    input: Registration,
) -> Result<(User, String), AppError> {
    validate_email(&input.email)?;
    let first_name = validate_name("firstName", &input.first_name)?;
    let last_name = validate_name("lastName", &input.last_name)?;
    validate_password(&input.password)?;
    let gender = input.gender.as_deref().map(validate_gender).transpose()?;

    let password_hash = hash_password_blocking(input.password, security.clone()).await?;
    let user = users_repo::create_user(
        conn,
        UserCreate {
            email: input.email,
            password_hash,
            first_name,
            last_name,
            date_of_birth: input.date_of_birth,
            gender,
        },
    )
    .await?;

    let token = issue_token(&user, security)?;
    info!(user_id = %user.id, email = %Redacted(&user.email), "user registered");
    Ok((user, token))
}

/// Check credentials and mint a token. Unknown email is 404, a wrong
/// password is 401.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<(User, String), AppError> {
    validate_email(email)?;

    let Some(user) = users_repo::find_by_email(conn, email).await? else {
        security::login_failed("unknown_email", email);
        return Err(user_not_found());
    };

    let matches = verify_password_blocking(
        password.to_string(),
        user.password_hash.clone(),
        security.clone(),
    )
    .await?;
    if !matches {
        security::login_failed("bad_password", email);
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&user, security)?;
    info!(user_id = %user.id, "user logged in");
    Ok((user, token))
}

/// Resolve the user at `email` and require that the caller owns it.
pub async fn owned_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: &BackendClaims,
    email: &str,
) -> Result<User, AppError> {
    validate_email(email)?;
    let user = users_repo::find_by_email(conn, email)
        .await?
        .ok_or_else(user_not_found)?;
    ensure_owner(&subject.sub, &user.id.to_string(), email)?;
    Ok(user)
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: &BackendClaims,
    email: &str,
    changes: ProfileChanges,
) -> Result<User, AppError> {
    let patch = ProfilePatch {
        first_name: changes
            .first_name
            .as_deref()
            .map(|v| validate_name("firstName", v))
            .transpose()?,
        last_name: changes
            .last_name
            .as_deref()
            .map(|v| validate_name("lastName", v))
            .transpose()?,
        date_of_birth: changes.date_of_birth,
        gender: changes
            .gender
            .as_deref()
            .map(validate_gender)
            .transpose()?
            .map(Some),
    };

    let user = owned_user(conn, subject, email).await?;
    users_repo::update_profile(conn, &user.email, patch)
        .await?
        .ok_or_else(user_not_found)
}

pub async fn change_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    subject: &BackendClaims,
    email: &str,
    new_password: String,
) -> Result<(), AppError> {
    validate_password(&new_password)?;
    let user = owned_user(conn, subject, email).await?;

    let password_hash = hash_password_blocking(new_password, security.clone()).await?;
    users_repo::update_password(conn, &user.email, password_hash)
        .await?
        .ok_or_else(user_not_found)?;
    info!(user_id = %user.id, "password changed");
    Ok(())
}

/// Delete the account and its recordings in one transaction, then drop the
/// stored blobs. Blob cleanup failures are logged, not returned.
pub async fn delete_user<C: ConnectionTrait + TransactionTrait + Send + Sync>(
    conn: &C,
    blob_store: &dyn BlobStore,
    subject: &BackendClaims,
    email: &str,
) -> Result<(), AppError> {
    let user = owned_user(conn, subject, email).await?;
    let recordings = recordings_repo::list_for_user(conn, user.id).await?;

    let txn = conn.begin().await?;
    recordings_repo::delete_for_user(&txn, user.id).await?;
    users_repo::delete_by_email(&txn, &user.email)
        .await?
        .ok_or_else(user_not_found)?;
    txn.commit().await?;

    for recording in &recordings {
        if let Err(e) = blob_store.delete(&recording.object_key).await {
            warn!(
                object_key = %Redacted(&recording.object_key),
                error = %e,
                "failed to remove blob for deleted user"
            );
        }
    }

    info!(user_id = %user.id, recordings = recordings.len(), "user deleted");
    Ok(())
}
