//! Error taxonomy shared by the services and the store adapters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A read or write against the directory store failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Writing or removing a blob failed.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Image fetch, feature extraction or the downstream read failed.
    #[error("{message}: {details}")]
    Gateway { message: String, details: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DirectoryError {
    pub fn query(err: impl std::fmt::Display) -> Self {
        DirectoryError::Query(err.to_string())
    }

    pub fn upload(err: impl std::fmt::Display) -> Self {
        DirectoryError::Upload(err.to_string())
    }

    pub fn gateway(details: impl std::fmt::Display) -> Self {
        DirectoryError::Gateway {
            message: "An unexpected error occurred".to_string(),
            details: details.to_string(),
        }
    }
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        DirectoryError::Query(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
