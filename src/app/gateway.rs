//! The image-search gateway.
//!
//! NOTE: image search is a placeholder. The gateway downloads the image and
//! computes its embedding, but the embedding is not used yet: the response is
//! the first [`GATEWAY_RESULT_LIMIT`] records in store order, whatever the
//! image. The inference call is kept so latency and cost match the deployed
//! function.

use crate::domain::{DirectoryError, PersonRecord, Result};
use crate::infra::{FeatureExtractor, ImageFetcher};
use crate::storage::DirectoryStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

pub const GATEWAY_RESULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageSearchRequest {
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageSearchResponse {
    pub results: Vec<PersonRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatewayErrorBody {
    pub error: String,
    pub details: String,
}

/// What the client-side image search calls, in-process or over HTTP.
#[async_trait]
pub trait ImageSearchGateway: Send + Sync {
    async fn search_by_image(&self, image_url: &str) -> Result<Vec<PersonRecord>>;
}

fn into_gateway_error(err: DirectoryError) -> DirectoryError {
    match err {
        DirectoryError::Gateway { .. } => err,
        other => DirectoryError::gateway(other),
    }
}

pub struct SearchGateway {
    fetcher: Arc<dyn ImageFetcher>,
    extractor: Arc<dyn FeatureExtractor>,
    store: Arc<dyn DirectoryStore>,
}

impl SearchGateway {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        extractor: Arc<dyn FeatureExtractor>,
        store: Arc<dyn DirectoryStore>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            store,
        }
    }

    pub async fn search(&self, image_url: &str) -> Result<Vec<PersonRecord>> {
        if image_url.trim().is_empty() {
            return Err(DirectoryError::gateway("imageUrl is required"));
        }

        let image = self
            .fetcher
            .fetch(image_url)
            .await
            .map_err(into_gateway_error)?;
        let embedding = self
            .extractor
            .extract(&image)
            .await
            .map_err(into_gateway_error)?;

        // Placeholder: results are not filtered or ranked by `embedding`.
        debug!(
            image_bytes = image.len(),
            dimensions = embedding.len(),
            "embedding computed and discarded"
        );

        self.store
            .list_persons(GATEWAY_RESULT_LIMIT)
            .await
            .map_err(into_gateway_error)
    }
}

#[async_trait]
impl ImageSearchGateway for SearchGateway {
    async fn search_by_image(&self, image_url: &str) -> Result<Vec<PersonRecord>> {
        self.search(image_url).await
    }
}

/// Client for a gateway deployed separately (`POST {"imageUrl"}`).
#[derive(Clone)]
pub struct HttpSearchGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSearchGateway {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ImageSearchGateway for HttpSearchGateway {
    async fn search_by_image(&self, image_url: &str) -> Result<Vec<PersonRecord>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ImageSearchRequest {
                image_url: image_url.to_string(),
            })
            .send()
            .await
            .map_err(|e| DirectoryError::gateway(format!("gateway unreachable: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let body: ImageSearchResponse = response
                .json()
                .await
                .map_err(|e| DirectoryError::gateway(format!("invalid gateway response: {}", e)))?;
            return Ok(body.results);
        }

        match response.json::<GatewayErrorBody>().await {
            Ok(body) => Err(DirectoryError::Gateway {
                message: body.error,
                details: body.details,
            }),
            Err(_) => Err(DirectoryError::gateway(format!("gateway returned {}", status))),
        }
    }
}
