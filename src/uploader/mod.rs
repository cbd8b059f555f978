//! Image hosting integration
//!
//! Uploads raw image bytes to a freeimage.host-compatible endpoint and
//! reports the public URL, or why there is none.

pub mod client;
pub mod mock;

pub use client::FreeimageClient;
pub use mock::MockUploader;

use crate::models::UploadOutcome;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Never fails outright: transport and protocol problems come back as
    /// [`UploadOutcome::Failure`].
    async fn upload(&self, image_bytes: &[u8]) -> UploadOutcome;

    /// Read an image from disk and upload it. Only a read failure is an error.
    async fn upload_path(&self, path: &Path) -> Result<UploadOutcome> {
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.upload(&bytes).await)
    }
}
