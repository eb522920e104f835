//! Free-text search over the directory.

use crate::app::search_log::record_search;
use crate::domain::{NewSearchLog, PersonFilter, PersonRecord, Result};
use crate::storage::DirectoryStore;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct TextSearch {
    store: Arc<dyn DirectoryStore>,
}

impl TextSearch {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Records where any of name, address, phone number, email or NID number
    /// contains `term`, ignoring case. An empty term matches every record.
    ///
    /// A successful search is logged as `text` whether or not it matched.
    pub async fn search(&self, term: &str) -> Result<Vec<PersonRecord>> {
        let filter = PersonFilter::new(term);
        let results = self.store.search_persons(&filter).await?;
        debug!(term, matches = results.len(), "text search");

        record_search(self.store.clone(), NewSearchLog::text(term));
        Ok(results)
    }
}
