//! Domain model definitions for directory entries and search activity.

use crate::domain::error::{DirectoryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Query text recorded for image searches (there is no free-text term).
pub const IMAGE_SEARCH_QUERY_MARKER: &str = "[image]";

/// One directory entry as stored in `persons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonRecord {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub social_media: Option<String>,
    pub nid_number: Option<String>,
    /// Public URL of a completed upload, if a photo was attached.
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields submitted by the add-person form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewPerson {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub social_media: Option<String>,
    #[serde(default)]
    pub nid_number: Option<String>,
}

impl NewPerson {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// `name` is the only required field; whitespace alone does not count.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DirectoryError::Validation("Name is required".to_string()));
        }
        Ok(())
    }

    /// Builds the stored record. Used by stores that assign ids in-process.
    pub fn into_record(self, photo_url: Option<String>) -> PersonRecord {
        PersonRecord {
            id: Uuid::new_v4(),
            name: self.name,
            address: self.address,
            phone_number: self.phone_number,
            email: self.email,
            social_media: self.social_media,
            nid_number: self.nid_number,
            photo_url,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Text,
    Image,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Text => "text",
            SearchType::Image => "image",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(SearchType::Text),
            "image" => Ok(SearchType::Image),
            other => Err(DirectoryError::Query(format!(
                "unknown search log type '{}'",
                other
            ))),
        }
    }
}

/// Append-only record of one executed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchLogEntry {
    pub id: Uuid,
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSearchLog {
    pub query: String,
    pub search_type: SearchType,
}

impl NewSearchLog {
    pub fn text(term: impl Into<String>) -> Self {
        Self {
            query: term.into(),
            search_type: SearchType::Text,
        }
    }

    pub fn image() -> Self {
        Self {
            query: IMAGE_SEARCH_QUERY_MARKER.to_string(),
            search_type: SearchType::Image,
        }
    }
}

/// An uploaded image as received from a form.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }
}
