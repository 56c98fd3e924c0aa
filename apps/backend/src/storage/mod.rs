//! Blob storage for uploaded recordings.

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

mod fs;

pub use fs::FsBlobStore;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    /// The key would escape the store or is otherwise unusable
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    /// Another object already lives under the key; it is never replaced
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    #[error("blob store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Object storage keyed by recording object keys.
#[async_trait]
pub trait BlobStore: Send + Sync + Debug {
    /// Store `data` under `key`, returning the location it can be fetched from.
    /// Fails with `AlreadyExists` rather than replacing an existing object.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, BlobStoreError>;

    /// Remove `key`; a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), BlobStoreError>;
}
