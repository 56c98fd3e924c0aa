//! In-memory application state for route tests.

use std::sync::Arc;

use minutes::config::db::DbProfile;
use minutes::config::storage::BlobStoreConfig;
use minutes::infra::state::build_state;
use minutes::state::app_state::AppState;
use minutes::state::security_config::SecurityConfig;
use minutes::storage::FsBlobStore;
use tempfile::TempDir;

use super::mailer::CapturingMailer;

/// Everything a route test needs: the state to mount plus handles on the
/// pieces the test wants to inspect afterwards.
pub struct TestContext {
    pub state: AppState,
    pub security: SecurityConfig,
    pub mailer: Arc<CapturingMailer>,
    /// Kept alive so the blob directory outlives the test.
    pub blob_dir: TempDir,
}

pub async fn build_test_state() -> Result<TestContext, Box<dyn std::error::Error>> {
    build_test_state_with_mailer(CapturingMailer::new()).await
}

pub async fn build_test_state_with_mailer(
    mailer: Arc<CapturingMailer>,
) -> Result<TestContext, Box<dyn std::error::Error>> {
    let security = SecurityConfig::for_tests();
    let blob_dir = tempfile::tempdir()?;
    let blob_store = FsBlobStore::new(BlobStoreConfig::new(blob_dir.path()));

    let state = build_state()
        .with_db(DbProfile::InMemory)
        .with_security(security.clone())
        .with_blob_store(Arc::new(blob_store))
        .with_mailer(mailer.clone())
        .build()
        .await?;

    Ok(TestContext {
        state,
        security,
        mailer,
        blob_dir,
    })
}
