use std::path::PathBuf;

use super::opt_var;

/// Location of uploaded recordings and the URL prefix they are served under.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobStoreConfig {
    pub root: PathBuf,
    pub public_base_url: Option<String>,
}

impl BlobStoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_base_url: None,
        }
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// `BLOB_STORE_DIR` (default `./data/recordings`) and `BLOB_PUBLIC_BASE_URL`.
    pub fn from_env() -> Self {
        let root = opt_var("BLOB_STORE_DIR").unwrap_or_else(|| "./data/recordings".to_string());
        Self {
            root: PathBuf::from(root),
            public_base_url: opt_var("BLOB_PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
        }
    }
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self::new("./data/recordings")
    }
}
