use crate::domain::{DirectoryError, Result};
use async_trait::async_trait;

/// Downloads the image a gateway request points at.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[derive(Clone, Default)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DirectoryError::gateway(format!("failed to fetch image: {}", e)))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::gateway(format!("failed to read image body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
