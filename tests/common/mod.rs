//! Shared fakes and helpers for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use person_directory::domain::{DirectoryError, Result};
use person_directory::infra::{FeatureExtractor, ImageFetcher};
use person_directory::storage::StoreOp;
use person_directory::{
    DirectoryService, DirectoryStore, ImageFile, MemoryBlobStore, MemoryDirectoryStore, NewPerson,
    SearchGateway,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Returns a fixed 512-dimension vector and counts calls.
#[derive(Default)]
pub struct StaticExtractor {
    pub calls: AtomicUsize,
}

#[async_trait]
impl FeatureExtractor for StaticExtractor {
    async fn extract(&self, image: &[u8]) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![image.len() as f32; 512])
    }
}

pub struct FailingExtractor;

#[async_trait]
impl FeatureExtractor for FailingExtractor {
    async fn extract(&self, _image: &[u8]) -> Result<Vec<f32>> {
        Err(DirectoryError::gateway("inference service returned 503: Model is loading"))
    }
}

/// Fetches from a memory bucket by public URL.
pub struct BucketFetcher {
    pub blobs: Arc<MemoryBlobStore>,
    pub fetched: AtomicUsize,
}

impl BucketFetcher {
    pub fn new(blobs: Arc<MemoryBlobStore>) -> Self {
        Self {
            blobs,
            fetched: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImageFetcher for BucketFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.fetch_add(1, Ordering::SeqCst);
        self.blobs
            .get_by_url(url)
            .await
            .ok_or_else(|| DirectoryError::gateway(format!("failed to fetch image: 404 for {}", url)))
    }
}

pub struct Harness {
    pub store: Arc<MemoryDirectoryStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub extractor: Arc<StaticExtractor>,
    pub gateway: Arc<SearchGateway>,
    pub service: DirectoryService,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryDirectoryStore::new());
        let blobs = Arc::new(MemoryBlobStore::default());
        let extractor = Arc::new(StaticExtractor::default());
        let gateway = Arc::new(SearchGateway::new(
            Arc::new(BucketFetcher::new(blobs.clone())),
            extractor.clone(),
            store.clone(),
        ));
        let service = DirectoryService::new(store.clone(), blobs.clone(), gateway.clone());
        Self {
            store,
            blobs,
            extractor,
            gateway,
            service,
        }
    }
}

pub fn person(name: &str, phone: &str, email: &str) -> NewPerson {
    NewPerson {
        name: name.to_string(),
        address: Some(String::new()),
        phone_number: Some(phone.to_string()),
        email: Some(email.to_string()),
        social_media: None,
        nid_number: None,
    }
}

pub async fn seed_named(store: &dyn DirectoryStore, count: usize) {
    for i in 0..count {
        store
            .insert_person(NewPerson::named(format!("Person {:02}", i)), None)
            .await
            .unwrap();
    }
}

/// Bytes that start like a JPEG file.
pub fn jpeg(size: usize) -> ImageFile {
    let mut bytes = vec![0u8; size];
    bytes[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
    ImageFile::new("query.jpg", Some("image/jpeg"), bytes)
}

/// Waits for detached tasks (search logging, background cleanup).
pub async fn wait_for_calls(store: &MemoryDirectoryStore, op: StoreOp, expected: usize) -> usize {
    for _ in 0..100 {
        let seen = store.calls(op).await;
        if seen >= expected {
            return seen;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    store.calls(op).await
}

/// Lets already-spawned tasks run to completion.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
