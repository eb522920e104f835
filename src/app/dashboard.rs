//! Admin dashboard counts and recent activity.

use crate::domain::SearchLogEntry;
use crate::storage::DirectoryStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

pub const RECENT_SEARCH_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    TotalRecords,
    TotalSearches,
    RecentSearches,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardFailure {
    pub section: DashboardSection,
    pub error: String,
}

/// Sections that failed are defaulted (zero / empty) and listed in `failures`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    pub total_records: i64,
    pub total_searches: i64,
    pub recent_searches: Vec<SearchLogEntry>,
    pub failures: Vec<DashboardFailure>,
}

#[derive(Clone)]
pub struct DashboardAggregator {
    store: Arc<dyn DirectoryStore>,
}

impl DashboardAggregator {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Runs the three read-only queries independently; none of them can
    /// prevent the others from being reported.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let (records, searches, recent) = tokio::join!(
            self.store.count_persons(),
            self.store.count_search_logs(),
            self.store.recent_search_logs(RECENT_SEARCH_LIMIT),
        );

        let mut failures = Vec::new();
        let mut note_failure = |section: DashboardSection, err: crate::domain::DirectoryError| {
            warn!(?section, error = %err, "dashboard query failed");
            failures.push(DashboardFailure {
                section,
                error: err.to_string(),
            });
        };

        let total_records = records.unwrap_or_else(|e| {
            note_failure(DashboardSection::TotalRecords, e);
            0
        });
        let total_searches = searches.unwrap_or_else(|e| {
            note_failure(DashboardSection::TotalSearches, e);
            0
        });
        let recent_searches = recent.unwrap_or_else(|e| {
            note_failure(DashboardSection::RecentSearches, e);
            Vec::new()
        });

        DashboardSnapshot {
            total_records,
            total_searches,
            recent_searches,
            failures,
        }
    }
}
