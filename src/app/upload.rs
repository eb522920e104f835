//! Upload pipeline: image file -> blob key -> public URL.

use crate::domain::{DirectoryError, ImageFile, Result};
use crate::storage::BlobStore;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Key prefix for uploads that only live for one image search.
pub const TEMP_PREFIX: &str = "temp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub key: String,
    pub url: String,
}

/// `<uuid>.<ext>`, optionally under `prefix/`. The extension of the original
/// file name is kept (lowercased); the base name is never reused.
pub fn storage_key(file_name: &str, prefix: Option<&str>) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase());

    let name = match ext {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };
    match prefix {
        Some(prefix) => format!("{}/{}", prefix, name),
        None => name,
    }
}

fn check_image(file: &ImageFile) -> Result<()> {
    if file.bytes.is_empty() {
        return Err(DirectoryError::Upload(format!("'{}' is empty", file.file_name)));
    }
    if let Some(content_type) = file.content_type.as_deref() {
        if !content_type.starts_with("image/") {
            return Err(DirectoryError::Upload(format!(
                "invalid content type '{}', expected an image",
                content_type
            )));
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct UploadPipeline {
    blobs: Arc<dyn BlobStore>,
}

impl UploadPipeline {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Stores `file` permanently (the add-person flow).
    pub async fn upload(&self, file: &ImageFile) -> Result<StoredImage> {
        check_image(file)?;
        let key = storage_key(&file.file_name, None);
        let key = self.put(&key, file).await?;
        let url = self.blobs.public_url(&key);
        Ok(StoredImage { key, url })
    }

    /// Stores `file` under `temp/`. The object is removed when the returned
    /// handle is released or dropped.
    ///
    /// The handle is armed before the upload starts, so a future dropped
    /// mid-upload still removes whatever reached the bucket.
    pub async fn upload_temporary(&self, file: &ImageFile) -> Result<TemporaryImage> {
        check_image(file)?;
        let key = storage_key(&file.file_name, Some(TEMP_PREFIX));
        let mut temp = TemporaryImage {
            stored: StoredImage {
                url: self.blobs.public_url(&key),
                key,
            },
            blobs: self.blobs.clone(),
            released: false,
        };
        let uploaded = self.put(&temp.stored.key, file).await;
        match uploaded {
            Ok(key) => {
                if key != temp.stored.key {
                    temp.stored.url = self.blobs.public_url(&key);
                    temp.stored.key = key;
                }
                Ok(temp)
            }
            Err(e) => {
                // The write may have been partial.
                temp.release().await;
                Err(e)
            }
        }
    }

    /// Uploads `file` temporarily, runs `f` with its public URL, then removes
    /// the object whatever `f` returned.
    pub async fn with_temporary<F, Fut, T>(&self, file: &ImageFile, f: F) -> Result<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let temp = self.upload_temporary(file).await?;
        let outcome = f(temp.url().to_string()).await;
        temp.release().await;
        outcome
    }

    async fn put(&self, key: &str, file: &ImageFile) -> Result<String> {
        let key = self
            .blobs
            .upload(key, &file.bytes, file.content_type.as_deref())
            .await
            .map_err(|e| match e {
                DirectoryError::Upload(_) => e,
                other => DirectoryError::upload(other),
            })?;
        debug!(%key, bytes = file.bytes.len(), "image uploaded");
        Ok(key)
    }
}

/// A blob that must not outlive the operation it was uploaded for.
pub struct TemporaryImage {
    stored: StoredImage,
    blobs: Arc<dyn BlobStore>,
    released: bool,
}

impl TemporaryImage {
    pub fn key(&self) -> &str {
        &self.stored.key
    }

    pub fn url(&self) -> &str {
        &self.stored.url
    }

    /// Removes the object now. A failed removal is logged, not returned.
    pub async fn release(mut self) {
        self.released = true;
        let keys = [self.stored.key.clone()];
        if let Err(e) = self.blobs.remove(&keys).await {
            warn!(key = %self.stored.key, error = %e, "failed to remove temporary image");
        }
    }
}

impl Drop for TemporaryImage {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // Dropped before release (cancelled future): remove in the background.
        let blobs = self.blobs.clone();
        let keys = [self.stored.key.clone()];
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = blobs.remove(&keys).await {
                        warn!(key = %keys[0], error = %e, "failed to remove temporary image");
                    }
                });
            }
            Err(_) => warn!(key = %self.stored.key, "temporary image leaked: no runtime to remove it"),
        }
    }
}
