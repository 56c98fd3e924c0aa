//! `/api/users`: registration, login and the owner-scoped account routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentSubject, ValidatedJson};
use crate::middleware::jwt_extract::JwtExtract;
use crate::repos::users::User;
use crate::services::users::{self as users_service, ProfileChanges, Registration};
use crate::state::app_state::AppState;
use crate::utils::dates::{format_date, format_timestamp, parse_date};

/// Public shape of a user. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            date_of_birth: format_date(user.date_of_birth),
            gender: user.gender.clone(),
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: String,
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    user: UserView,
    token: String,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    user: UserView,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

fn date_of_birth(raw: &str) -> Result<time::Date, AppError> {
    parse_date(raw).ok_or_else(|| {
        AppError::invalid(
            ErrorCode::ValidationError,
            "dateOfBirth must be a YYYY-MM-DD date",
        )
    })
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let req = body.into_inner();

    let registration = Registration {
        date_of_birth: date_of_birth(&req.date_of_birth)?,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password: req.password,
        gender: req.gender,
    };

    let (user, token) = users_service::register(db, &app_state.security, registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse {
        user: UserView::from(&user),
        token,
    }))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let (user, token) =
        users_service::login(db, &app_state.security, &body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: UserView::from(&user),
        token,
    }))
}

async fn read_user(
    path: web::Path<String>,
    subject: CurrentSubject,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let user = users_service::owned_user(db, subject.claims(), &path).await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        user: UserView::from(&user),
    }))
}

async fn update_user(
    path: web::Path<String>,
    subject: CurrentSubject,
    body: ValidatedJson<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let req = body.into_inner();

    let changes = ProfileChanges {
        first_name: req.first_name,
        last_name: req.last_name,
        date_of_birth: req.date_of_birth.as_deref().map(date_of_birth).transpose()?,
        gender: req.gender,
    };

    let user = users_service::update_profile(db, subject.claims(), &path, changes).await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        user: UserView::from(&user),
    }))
}

async fn change_password(
    path: web::Path<String>,
    subject: CurrentSubject,
    body: ValidatedJson<ChangePasswordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let req = body.into_inner();

    users_service::change_password(
        db,
        &app_state.security,
        subject.claims(),
        &path,
        req.password,
    )
    .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password updated successfully",
    }))
}

async fn delete_user(
    path: web::Path<String>,
    subject: CurrentSubject,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    users_service::delete_user(db, app_state.blob_store.as_ref(), subject.claims(), &path).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(
            web::resource("/{email}/password")
                .wrap(JwtExtract)
                .route(web::patch().to(change_password)),
        )
        .service(
            web::resource("/{email}")
                .wrap(JwtExtract)
                .route(web::get().to(read_user))
                .route(web::patch().to(update_user))
                .route(web::delete().to(delete_user)),
        );
}
