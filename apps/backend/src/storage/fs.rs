use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{BlobStore, BlobStoreError};
use crate::config::storage::BlobStoreConfig;
use crate::logging::pii::Redacted;

/// Blob store writing one file per key beneath a root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FsBlobStore {
    pub fn new(config: BlobStoreConfig) -> Self {
        Self {
            root: config.root,
            public_base_url: config.public_base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map `key` to a single file name directly under the root.
    fn path_for(&self, key: &str) -> Result<PathBuf, BlobStoreError> {
        let file_name = sanitize_key(key)?;
        Ok(self.root.join(file_name))
    }

    fn location(&self, file_name: &str, path: &Path) -> String {
        match &self.public_base_url {
            Some(base) => format!("{base}/{file_name}"),
            None => path.display().to_string(),
        }
    }
}

/// Replace path separators and control characters so a key can never name
/// anything outside the store root.
pub(crate) fn sanitize_key(key: &str) -> Result<String, BlobStoreError> {
    let cleaned: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(BlobStoreError::InvalidKey(key.to_string()));
    }
    Ok(cleaned)
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, BlobStoreError> {
        let file_name = sanitize_key(key)?;
        let path = self.root.join(&file_name);
        fs::create_dir_all(&self.root).await?;

        // Stage under a per-call name, then hard-link into place: the link
        // fails if the key exists, so readers never see a partial object and
        // an existing object is never replaced.
        let staging = self
            .root
            .join(format!(".{file_name}.{}.part", Uuid::new_v4()));
        let published = match fs::write(&staging, &data).await {
            Ok(()) => fs::hard_link(&staging, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = fs::remove_file(&staging).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key = %Redacted(key), error = %e, "failed to remove staging file");
            }
        }
        match published {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(BlobStoreError::AlreadyExists(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            key = %Redacted(key),
            size_bytes = data.len(),
            content_type = content_type.unwrap_or("application/octet-stream"),
            "blob stored"
        );
        Ok(self.location(&file_name, &path))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobStoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key = %Redacted(key), "blob already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
