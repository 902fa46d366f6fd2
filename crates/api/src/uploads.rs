//! Image storage for uploaded catalog images.
//!
//! Handlers only see the [`ImageStore`] trait; the stored path it returns is
//! written verbatim into the owning record.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::ServerConfig;

/// Maximum accepted upload size (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image file extensions (lowercase).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "avif"];

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Unsupported image format '{0}'. Supported: png, jpg, jpeg, webp, gif, avif")]
    UnsupportedType(String),

    #[error("Uploaded image is empty")]
    Empty,

    #[error("Uploaded image exceeds {MAX_IMAGE_BYTES} bytes")]
    TooLarge,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persists uploaded images and returns the path clients should use.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under a fresh name derived from `file_name`'s extension.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError>;
}

/// Lowercased extension of `file_name`, if it is a supported image type.
pub fn image_extension(file_name: &str) -> Result<String, ImageStoreError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(ImageStoreError::UnsupportedType(ext))
    }
}

/// Writes images to a local directory served under a URL prefix.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
    url_prefix: String,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.upload_dir, &config.upload_url_prefix)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError> {
        let ext = image_extension(file_name)?;
        if bytes.is_empty() {
            return Err(ImageStoreError::Empty);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageStoreError::TooLarge);
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let stored_name = format!("{}.{ext}", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&stored_name), bytes).await?;

        tracing::debug!(file = %stored_name, size = bytes.len(), "Stored uploaded image");
        Ok(format!("{}/{stored_name}", self.url_prefix))
    }
}
