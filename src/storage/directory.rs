use crate::domain::{NewPerson, NewSearchLog, PersonFilter, PersonRecord, Result, SearchLogEntry};
use async_trait::async_trait;

/// Data-access contract for the directory tables.
///
/// Injected into every service as `Arc<dyn DirectoryStore>` so the Postgres
/// adapter and the in-memory fake are interchangeable.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Records matching `filter`, in insertion order.
    async fn search_persons(&self, filter: &PersonFilter) -> Result<Vec<PersonRecord>>;

    async fn insert_person(
        &self,
        person: NewPerson,
        photo_url: Option<String>,
    ) -> Result<PersonRecord>;

    /// The first `limit` records in insertion order, unfiltered.
    async fn list_persons(&self, limit: u32) -> Result<Vec<PersonRecord>>;

    async fn count_persons(&self) -> Result<i64>;

    async fn insert_search_log(&self, entry: NewSearchLog) -> Result<SearchLogEntry>;

    async fn count_search_logs(&self) -> Result<i64>;

    /// Most recent entries first.
    async fn recent_search_logs(&self, limit: u32) -> Result<Vec<SearchLogEntry>>;

    async fn ping(&self) -> Result<()>;
}
