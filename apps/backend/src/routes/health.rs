//! `GET /health`: liveness plus a database and migration check.
//!
//! Always answers 200; a broken database shows up in the body, not the
//! status, so load balancers keep routing to an instance that can still
//! report its own state.

use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use time::OffsetDateTime;

use crate::state::app_state::AppState;
use crate::utils::dates::format_timestamp;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<&'static str>,
    migrations: String,
    time: String,
}

struct DbHealth {
    db: &'static str,
    db_error: Option<&'static str>,
    migrations: String,
}

impl DbHealth {
    fn failed(reason: &'static str) -> Self {
        Self {
            db: "error",
            db_error: Some(reason),
            migrations: "unknown".to_string(),
        }
    }
}

async fn check_db(db: &DatabaseConnection) -> DbHealth {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    if db.query_one(ping).await.is_err() {
        return DbHealth::failed("DB query failed");
    }

    let migrations = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    DbHealth {
        db: "ok",
        db_error: None,
        migrations,
    }
}

async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    let db_health = match app_state.db() {
        Some(db) => check_db(db).await,
        None => DbHealth::failed("DB not configured"),
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: db_health.db,
        db_error: db_health.db_error,
        migrations: db_health.migrations,
        time: format_timestamp(OffsetDateTime::now_utc()),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
