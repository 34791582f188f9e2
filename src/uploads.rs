//! Image storage on the local filesystem
//!
//! Uploaded cake photos are written under the configured upload directory
//! with a timestamp-derived name, and served back under `/uploads/{file}`.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Filesystem-backed store for uploaded cake images.
#[derive(Clone, Debug)]
pub struct ImageStore {
    upload_dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the given directory.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to create upload directory {}: {}",
                    self.upload_dir.display(),
                    e
                )
            })
    }

    /// Directory the images are written to (and served from).
    pub fn dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Public URL path for a stored file, as embedded in cake records.
    pub fn public_path(&self, filename: &str) -> String {
        format!("/uploads/{filename}")
    }

    /// Derive a stored filename: upload time in milliseconds plus the
    /// extension of the client-provided name, e.g. `1707654321000.png`.
    fn generate_filename(original_name: &str) -> String {
        let stamp = chrono::Utc::now().timestamp_millis();
        match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{stamp}.{ext}"),
            None => stamp.to_string(),
        }
    }

    /// Write image bytes to disk and return the stored filename.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let filename = Self::generate_filename(original_name);
        let path = self.upload_dir.join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| anyhow!("Failed to write image {}: {}", path.display(), e))?;

        Ok(filename)
    }

    /// Remove a stored file, logging rather than failing when it is already
    /// gone. Used to roll back an upload whose cake record was never saved.
    pub async fn remove(&self, filename: &str) {
        let path = self.upload_dir.join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Failed to remove image {}: {}", path.display(), e);
        }
    }
}
