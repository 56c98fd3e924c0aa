use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::config::mail::MailConfig;
use crate::config::storage::BlobStoreConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::mail::{mailer_from_config, Mailer};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::storage::{BlobStore, FsBlobStore};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    blob_store: Option<Arc<dyn BlobStore>>,
    mailer: Option<Arc<dyn Mailer>>,
    mail_config: MailConfig,
    blob_config: BlobStoreConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            blob_store: None,
            mailer: None,
            mail_config: MailConfig::default(),
            blob_config: BlobStoreConfig::default(),
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Use an already-built blob store instead of one from `BlobStoreConfig`.
    pub fn with_blob_store(mut self, blob_store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(blob_store);
        self
    }

    pub fn with_blob_config(mut self, config: BlobStoreConfig) -> Self {
        self.blob_config = config;
        self
    }

    /// Use an already-built mailer instead of one from `MailConfig`.
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_mail_config(mut self, config: MailConfig) -> Self {
        self.mail_config = config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let blob_store = match self.blob_store {
            Some(store) => store,
            None => Arc::new(FsBlobStore::new(self.blob_config)) as Arc<dyn BlobStore>,
        };
        let mailer = match self.mailer {
            Some(mailer) => mailer,
            None => mailer_from_config(&self.mail_config)?,
        };

        if let Some(profile) = self.db_profile {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(profile).await?;
            Ok(AppState::new(
                conn,
                self.security_config,
                blob_store,
                mailer,
            ))
        } else {
            Ok(AppState::new_without_db(
                self.security_config,
                blob_store,
                mailer,
            ))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
