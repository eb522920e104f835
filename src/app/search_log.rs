//! Best-effort search logging.

use crate::domain::NewSearchLog;
use crate::storage::DirectoryStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Appends `entry` on a detached task. Failures are logged and swallowed so
/// the search being recorded is never affected.
pub fn record_search(store: Arc<dyn DirectoryStore>, entry: NewSearchLog) -> JoinHandle<()> {
    tokio::spawn(async move {
        let search_type = entry.search_type;
        match store.insert_search_log(entry).await {
            Ok(log) => debug!(id = %log.id, %search_type, "search logged"),
            Err(e) => warn!(%search_type, error = %e, "failed to record search log"),
        }
    })
}
