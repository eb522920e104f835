//! Builds the services from configuration. Shared by the binaries.

use crate::app::gateway::{HttpSearchGateway, ImageSearchGateway, SearchGateway};
use crate::infra::config::{self, StoreBackend};
use crate::infra::{HfFeatureExtractor, HttpImageFetcher};
use crate::storage::{DirectoryStore, MemoryDirectoryStore, PostgresDirectoryStore};
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn connect_store() -> anyhow::Result<Arc<dyn DirectoryStore>> {
    match config::store_backend()? {
        StoreBackend::Postgres => {
            let url = config::database_url()?;
            let store = PostgresDirectoryStore::connect(&url, config::db_max_connections()?)
                .await
                .context("failed to connect to the directory database")?;
            info!("Directory store: postgres");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Directory store: in-memory (records are lost on exit)");
            Ok(Arc::new(MemoryDirectoryStore::new()))
        }
    }
}

/// The in-process gateway: HTTP image fetch + hosted feature extraction.
pub fn build_gateway(
    client: reqwest::Client,
    store: Arc<dyn DirectoryStore>,
) -> anyhow::Result<SearchGateway> {
    let token = config::hugging_face_access_token()?;
    let extractor = HfFeatureExtractor::new(
        client.clone(),
        config::hf_inference_url(),
        config::embedding_model(),
        token,
    );
    info!(endpoint = %extractor.endpoint(), "Image search gateway configured");
    Ok(SearchGateway::new(
        Arc::new(HttpImageFetcher::new(client)),
        Arc::new(extractor),
        store,
    ))
}

/// The gateway client-side image searches call, plus the local gateway to
/// host when there is one. A remote endpoint needs no inference token.
pub fn select_gateway(
    client: reqwest::Client,
    store: Arc<dyn DirectoryStore>,
    remote_url: Option<String>,
) -> anyhow::Result<(Arc<dyn ImageSearchGateway>, Option<Arc<SearchGateway>>)> {
    match remote_url {
        Some(url) => {
            info!(%url, "Image searches go to a remote gateway");
            let remote: Arc<dyn ImageSearchGateway> = Arc::new(HttpSearchGateway::new(client, url));
            Ok((remote, None))
        }
        None => {
            let local = Arc::new(build_gateway(client, store)?);
            let client_side: Arc<dyn ImageSearchGateway> = local.clone();
            Ok((client_side, Some(local)))
        }
    }
}
