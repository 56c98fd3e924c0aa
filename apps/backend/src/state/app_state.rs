use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::error::AppError;
use crate::mail::Mailer;
use crate::storage::BlobStore;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in handler tests that never touch storage)
    db: Option<DatabaseConnection>,
    /// Token and password settings
    pub security: SecurityConfig,
    /// Where uploaded recordings are written
    pub blob_store: Arc<dyn BlobStore>,
    /// Outbound mail transport
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        security: SecurityConfig,
        blob_store: Arc<dyn BlobStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            db: Some(db),
            security,
            blob_store,
            mailer,
        }
    }

    pub fn new_without_db(
        security: SecurityConfig,
        blob_store: Arc<dyn BlobStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            db: None,
            security,
            blob_store,
            mailer,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Database connection, or `DB_UNAVAILABLE` when the state was built without one.
    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db.as_ref().ok_or_else(|| AppError::DbUnavailable {
            detail: "Database connection not configured".to_string(),
        })
    }
}
