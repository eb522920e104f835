//! The directory service.
//!
//! Ties the pieces together behind the operations the HTTP layer exposes:
//! 1.  Text search (with best-effort logging).
//! 2.  Adding a person, uploading the photo first when one is attached.
//! 3.  Image search through the gateway, with the temporary upload always
//!     removed afterwards.
//! 4.  Dashboard counts.

use crate::app::dashboard::{DashboardAggregator, DashboardSnapshot};
use crate::app::gateway::ImageSearchGateway;
use crate::app::search::TextSearch;
use crate::app::search_log::record_search;
use crate::app::upload::UploadPipeline;
use crate::domain::{ImageFile, NewPerson, NewSearchLog, PersonRecord, Result};
use crate::storage::{BlobStore, DirectoryStore};
use std::sync::Arc;
use tracing::info;

pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
    text_search: TextSearch,
    uploads: UploadPipeline,
    gateway: Arc<dyn ImageSearchGateway>,
    dashboard: DashboardAggregator,
}

impl DirectoryService {
    pub fn new(
        store: Arc<dyn DirectoryStore>,
        blobs: Arc<dyn BlobStore>,
        gateway: Arc<dyn ImageSearchGateway>,
    ) -> Self {
        Self {
            text_search: TextSearch::new(store.clone()),
            uploads: UploadPipeline::new(blobs),
            dashboard: DashboardAggregator::new(store.clone()),
            store,
            gateway,
        }
    }

    pub fn store(&self) -> &Arc<dyn DirectoryStore> {
        &self.store
    }

    pub async fn search(&self, term: &str) -> Result<Vec<PersonRecord>> {
        self.text_search.search(term).await
    }

    /// Validates, uploads the photo (if any), then inserts the record. A failed
    /// upload stops the flow before anything is inserted; a failed insert after
    /// a successful upload leaves the photo in storage.
    pub async fn add_person(
        &self,
        person: NewPerson,
        photo: Option<ImageFile>,
    ) -> Result<PersonRecord> {
        person.validate()?;

        let photo_url = match photo {
            Some(file) => Some(self.uploads.upload(&file).await?.url),
            None => None,
        };

        let record = self.store.insert_person(person, photo_url).await?;
        info!(id = %record.id, has_photo = record.photo_url.is_some(), "person added");
        Ok(record)
    }

    pub async fn image_search(&self, file: ImageFile) -> Result<Vec<PersonRecord>> {
        let gateway = self.gateway.clone();
        let results = self
            .uploads
            .with_temporary(&file, move |url| async move {
                gateway.search_by_image(&url).await
            })
            .await?;

        record_search(self.store.clone(), NewSearchLog::image());
        Ok(results)
    }

    pub async fn dashboard(&self) -> DashboardSnapshot {
        self.dashboard.snapshot().await
    }
}
