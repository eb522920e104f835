//! Directory store implementation using PostgreSQL.

use crate::domain::filter::SEARCHABLE_FIELDS;
use crate::domain::{
    DirectoryError, NewPerson, NewSearchLog, PersonFilter, PersonRecord, Result, SearchLogEntry,
};
use crate::storage::directory::DirectoryStore;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

const PERSON_COLUMNS: &str =
    "id, name, address, phone_number, email, social_media, nid_number, photo_url, created_at";

const SEARCH_LOG_COLUMNS: &str = "id, query, type, created_at";

/// A directory store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresDirectoryStore {
    pool: PgPool,
}

impl PostgresDirectoryStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    /// Wraps an existing pool and makes sure both tables exist.
    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS persons (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL CHECK (name <> ''),
                address TEXT,
                phone_number TEXT,
                email TEXT,
                social_media TEXT,
                nid_number TEXT,
                photo_url TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS search_logs (
                id UUID PRIMARY KEY,
                query TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('text', 'image')),
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS search_logs_created_at_idx ON search_logs (created_at DESC)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn person_from_row(row: &PgRow) -> std::result::Result<PersonRecord, sqlx::Error> {
    Ok(PersonRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        phone_number: row.try_get("phone_number")?,
        email: row.try_get("email")?,
        social_media: row.try_get("social_media")?,
        nid_number: row.try_get("nid_number")?,
        photo_url: row.try_get("photo_url")?,
        created_at: row.try_get("created_at")?,
    })
}

fn search_log_from_row(row: &PgRow) -> Result<SearchLogEntry> {
    let search_type: String = row.try_get("type")?;
    Ok(SearchLogEntry {
        id: row.try_get("id")?,
        query: row.try_get("query")?,
        search_type: search_type.parse()?,
        created_at: row.try_get("created_at")?,
    })
}

/// `SELECT ... WHERE name ILIKE $1 ESCAPE '\' OR address ILIKE $2 ESCAPE '\' OR ...`
fn build_search_query(filter: &PersonFilter) -> QueryBuilder<'static, Postgres> {
    let pattern = filter.like_pattern();
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM persons WHERE ", PERSON_COLUMNS));
    for (idx, column) in SEARCHABLE_FIELDS.iter().enumerate() {
        if idx > 0 {
            qb.push(" OR ");
        }
        qb.push(*column)
            .push(" ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\'");
    }
    qb.push(" ORDER BY created_at ASC, id ASC");
    qb
}

#[async_trait]
impl DirectoryStore for PostgresDirectoryStore {
    async fn search_persons(&self, filter: &PersonFilter) -> Result<Vec<PersonRecord>> {
        let mut qb = build_search_query(filter);
        let rows = qb.build().fetch_all(&self.pool).await?;
        let records = rows
            .iter()
            .map(person_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn insert_person(
        &self,
        person: NewPerson,
        photo_url: Option<String>,
    ) -> Result<PersonRecord> {
        let sql = format!(
            "INSERT INTO persons (id, name, address, phone_number, email, social_media, nid_number, photo_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            PERSON_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(person.name)
            .bind(person.address)
            .bind(person.phone_number)
            .bind(person.email)
            .bind(person.social_media)
            .bind(person.nid_number)
            .bind(photo_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(person_from_row(&row)?)
    }

    async fn list_persons(&self, limit: u32) -> Result<Vec<PersonRecord>> {
        let sql = format!(
            "SELECT {} FROM persons ORDER BY created_at ASC, id ASC LIMIT $1",
            PERSON_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;
        let records = rows
            .iter()
            .map(person_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn count_persons(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_search_log(&self, entry: NewSearchLog) -> Result<SearchLogEntry> {
        let sql = format!(
            "INSERT INTO search_logs (id, query, type) VALUES ($1, $2, $3) RETURNING {}",
            SEARCH_LOG_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(entry.query)
            .bind(entry.search_type.as_str())
            .fetch_one(&self.pool)
            .await?;
        search_log_from_row(&row)
    }

    async fn count_search_logs(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn recent_search_logs(&self, limit: u32) -> Result<Vec<SearchLogEntry>> {
        let sql = format!(
            "SELECT {} FROM search_logs ORDER BY created_at DESC, id DESC LIMIT $1",
            SEARCH_LOG_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(search_log_from_row).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DirectoryError::Query(format!("DB ping failed: {}", e)))?;
        Ok(())
    }
}
