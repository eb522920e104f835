//! Centralized configuration (environment variables + defaults).

use anyhow::Context;

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{} must be set", name))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Which directory store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// `DIRECTORY_STORE`: `postgres` (default) or `memory`.
pub fn store_backend() -> anyhow::Result<StoreBackend> {
    match optional("DIRECTORY_STORE").as_deref() {
        None | Some("postgres") => Ok(StoreBackend::Postgres),
        Some("memory") => Ok(StoreBackend::Memory),
        Some(other) => anyhow::bail!("DIRECTORY_STORE must be 'postgres' or 'memory', got '{}'", other),
    }
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    required("DATABASE_URL")
}

pub fn db_max_connections() -> anyhow::Result<u32> {
    match optional("DB_MAX_CONNECTIONS") {
        None => Ok(5),
        Some(v) => Ok(v
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid u32")?
            .max(1)),
    }
}

pub fn bind_addr() -> String {
    optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string())
}

/// Directory holding the photo bucket.
pub fn storage_dir() -> String {
    optional("STORAGE_DIR").unwrap_or_else(|| "./storage/person_photos".to_string())
}

/// Base URL under which the bucket is publicly served.
pub fn public_storage_url() -> String {
    optional("PUBLIC_STORAGE_URL").unwrap_or_else(|| "http://localhost:3000/storage".to_string())
}

/// Inference token for the image-search gateway (required by the gateway only).
pub fn hugging_face_access_token() -> anyhow::Result<String> {
    required("HUGGING_FACE_ACCESS_TOKEN")
}

pub fn hf_inference_url() -> String {
    optional("HF_INFERENCE_URL").unwrap_or_else(|| "https://api-inference.huggingface.co".to_string())
}

pub fn embedding_model() -> String {
    optional("EMBEDDING_MODEL").unwrap_or_else(|| "sentence-transformers/clip-ViT-B-32".to_string())
}

/// Remote gateway endpoint; unset means the in-process gateway is used.
pub fn image_search_gateway_url() -> Option<String> {
    optional("IMAGE_SEARCH_GATEWAY_URL")
}

/// Listen address of the standalone gateway binary.
pub fn gateway_bind_addr() -> String {
    optional("GATEWAY_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3001".to_string())
}
