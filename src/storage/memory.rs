//! In-process directory store.
//!
//! Evaluates [`PersonFilter`] with the same semantics as the SQL adapter and
//! keeps insertion order. Individual operations can be made to fail, and every
//! call is counted, so services can be exercised without a database.

use crate::domain::{
    DirectoryError, NewPerson, NewSearchLog, PersonFilter, PersonRecord, Result, SearchLogEntry,
};
use crate::storage::directory::DirectoryStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    SearchPersons,
    InsertPerson,
    ListPersons,
    CountPersons,
    InsertSearchLog,
    CountSearchLogs,
    RecentSearchLogs,
    Ping,
}

#[derive(Default)]
struct MemoryState {
    persons: Vec<PersonRecord>,
    search_logs: Vec<SearchLogEntry>,
    failing: HashSet<StoreOp>,
    calls: HashMap<StoreOp, usize>,
}

#[derive(Default)]
pub struct MemoryDirectoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call of `op` fail with a `Query` error.
    pub async fn fail_on(&self, op: StoreOp) {
        self.state.write().await.failing.insert(op);
    }

    pub async fn recover(&self, op: StoreOp) {
        self.state.write().await.failing.remove(&op);
    }

    /// Number of times `op` was attempted, failed attempts included.
    pub async fn calls(&self, op: StoreOp) -> usize {
        self.state.read().await.calls.get(&op).copied().unwrap_or(0)
    }

    pub async fn total_calls(&self) -> usize {
        self.state.read().await.calls.values().sum()
    }

    pub async fn persons(&self) -> Vec<PersonRecord> {
        self.state.read().await.persons.clone()
    }

    pub async fn search_logs(&self) -> Vec<SearchLogEntry> {
        self.state.read().await.search_logs.clone()
    }

    async fn enter(&self, op: StoreOp) -> Result<tokio::sync::RwLockWriteGuard<'_, MemoryState>> {
        let mut state = self.state.write().await;
        *state.calls.entry(op).or_insert(0) += 1;
        if state.failing.contains(&op) {
            return Err(DirectoryError::Query(format!(
                "memory store: {:?} is unavailable",
                op
            )));
        }
        Ok(state)
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn search_persons(&self, filter: &PersonFilter) -> Result<Vec<PersonRecord>> {
        let state = self.enter(StoreOp::SearchPersons).await?;
        Ok(state
            .persons
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn insert_person(
        &self,
        person: NewPerson,
        photo_url: Option<String>,
    ) -> Result<PersonRecord> {
        let mut state = self.enter(StoreOp::InsertPerson).await?;
        if person.name.is_empty() {
            return Err(DirectoryError::Query(
                "null value in column \"name\" violates not-null constraint".to_string(),
            ));
        }
        let record = person.into_record(photo_url);
        state.persons.push(record.clone());
        Ok(record)
    }

    async fn list_persons(&self, limit: u32) -> Result<Vec<PersonRecord>> {
        let state = self.enter(StoreOp::ListPersons).await?;
        Ok(state.persons.iter().take(limit as usize).cloned().collect())
    }

    async fn count_persons(&self) -> Result<i64> {
        let state = self.enter(StoreOp::CountPersons).await?;
        Ok(state.persons.len() as i64)
    }

    async fn insert_search_log(&self, entry: NewSearchLog) -> Result<SearchLogEntry> {
        let mut state = self.enter(StoreOp::InsertSearchLog).await?;
        let log = SearchLogEntry {
            id: Uuid::new_v4(),
            query: entry.query,
            search_type: entry.search_type,
            created_at: Utc::now(),
        };
        state.search_logs.push(log.clone());
        Ok(log)
    }

    async fn count_search_logs(&self) -> Result<i64> {
        let state = self.enter(StoreOp::CountSearchLogs).await?;
        Ok(state.search_logs.len() as i64)
    }

    async fn recent_search_logs(&self, limit: u32) -> Result<Vec<SearchLogEntry>> {
        let state = self.enter(StoreOp::RecentSearchLogs).await?;
        // Later pushes are newer; reverse keeps ties on `created_at` stable.
        Ok(state
            .search_logs
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        drop(self.enter(StoreOp::Ping).await?);
        Ok(())
    }
}
