//! Object storage for uploaded photos.

use crate::domain::{DirectoryError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// A single bucket of objects addressed by key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the key. Existing keys are never
    /// overwritten.
    async fn upload(&self, key: &str, bytes: &[u8], content_type: Option<&str>) -> Result<String>;

    /// Publicly resolvable URL of `key`. Does not check existence.
    fn public_url(&self, key: &str) -> String;

    /// Removes every key; keys that are already gone are ignored.
    async fn remove(&self, keys: &[String]) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool>;
}

/// Bucket stored as a directory on local disk, published under a base URL
/// (the API server serves it with `ServeDir`).
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> anyhow::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let well_formed = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !well_formed {
            return Err(DirectoryError::Upload(format!("invalid object key '{}'", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn upload(&self, key: &str, bytes: &[u8], _content_type: Option<&str>) -> Result<String> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(DirectoryError::upload)?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    DirectoryError::Upload(format!("object '{}' already exists", key))
                }
                _ => DirectoryError::upload(e),
            })?;
        file.write_all(bytes).await.map_err(DirectoryError::upload)?;
        file.flush().await.map_err(DirectoryError::upload)?;
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    async fn remove(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            let path = self.resolve(key)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(DirectoryError::upload(e)),
            }
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(DirectoryError::upload)
    }
}

#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// In-process bucket. Uploads can be switched to fail.
pub struct MemoryBlobStore {
    public_base_url: String,
    objects: RwLock<HashMap<String, StoredBlob>>,
    fail_uploads: AtomicBool,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("memory://person_photos")
    }
}

impl MemoryBlobStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
            fail_uploads: AtomicBool::new(false),
        }
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub async fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.read().await.get(key).cloned()
    }

    /// Resolves a URL produced by [`BlobStore::public_url`] back to its bytes.
    pub async fn get_by_url(&self, url: &str) -> Option<Vec<u8>> {
        let key = url
            .strip_prefix(&self.public_base_url)?
            .trim_start_matches('/');
        self.get(key).await.map(|b| b.bytes)
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, key: &str, bytes: &[u8], content_type: Option<&str>) -> Result<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(DirectoryError::Upload("storage quota exceeded".to_string()));
        }
        let mut objects = self.objects.write().await;
        if objects.contains_key(key) {
            return Err(DirectoryError::Upload(format!("object '{}' already exists", key)));
        }
        objects.insert(
            key.to_string(),
            StoredBlob {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    async fn remove(&self, keys: &[String]) -> Result<()> {
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_store_round_trip_and_idempotent_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "http://localhost:3000/storage/").unwrap();

        let key = store.upload("temp/a.jpg", b"jpeg", Some("image/jpeg")).await.unwrap();
        assert_eq!(key, "temp/a.jpg");
        assert!(store.exists("temp/a.jpg").await.unwrap());
        assert_eq!(
            store.public_url("temp/a.jpg"),
            "http://localhost:3000/storage/temp/a.jpg"
        );

        store.remove(&[key.clone()]).await.unwrap();
        assert!(!store.exists(&key).await.unwrap());
        store.remove(&[key]).await.unwrap();
    }

    #[tokio::test]
    async fn fs_store_refuses_overwrite_and_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "http://x").unwrap();

        store.upload("a.png", b"1", None).await.unwrap();
        assert!(matches!(
            store.upload("a.png", b"2", None).await,
            Err(DirectoryError::Upload(_))
        ));
        assert!(store.upload("../evil.png", b"x", None).await.is_err());
        assert!(store.upload("/etc/evil.png", b"x", None).await.is_err());
        assert!(store.upload("", b"x", None).await.is_err());
    }

    #[tokio::test]
    async fn memory_store_resolves_public_urls() {
        let store = MemoryBlobStore::default();
        store.upload("temp/b.jpg", b"abc", None).await.unwrap();
        let url = store.public_url("temp/b.jpg");
        assert_eq!(store.get_by_url(&url).await, Some(b"abc".to_vec()));
    }
}
