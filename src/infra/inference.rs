//! Feature extraction through the hosted inference API.

use crate::domain::{DirectoryError, Result};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Computes an embedding for raw image bytes.
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    async fn extract(&self, image: &[u8]) -> Result<Vec<f32>>;
}

/// Calls `<base>/pipeline/feature-extraction/<model>` with the image as the
/// request body.
#[derive(Clone)]
pub struct HfFeatureExtractor {
    client: reqwest::Client,
    base_url: String,
    model: String,
    access_token: String,
}

impl HfFeatureExtractor {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            access_token: access_token.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/pipeline/feature-extraction/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl FeatureExtractor for HfFeatureExtractor {
    async fn extract(&self, image: &[u8]) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.access_token)
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| DirectoryError::gateway(format!("inference request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::gateway(format!(
                "inference service returned {}: {}",
                status, body
            )));
        }

        let payload: JsonValue = response
            .json()
            .await
            .map_err(|e| DirectoryError::gateway(format!("invalid inference response: {}", e)))?;
        flatten_embedding(&payload)
    }
}

/// The API answers with a flat vector or nested arrays depending on the
/// model; both are flattened in order.
pub fn flatten_embedding(value: &JsonValue) -> Result<Vec<f32>> {
    fn walk(value: &JsonValue, out: &mut Vec<f32>) -> bool {
        match value {
            JsonValue::Number(n) => match n.as_f64() {
                Some(f) => {
                    out.push(f as f32);
                    true
                }
                None => false,
            },
            JsonValue::Array(items) => items.iter().all(|v| walk(v, out)),
            _ => false,
        }
    }

    let mut out = Vec::new();
    if !walk(value, &mut out) || out.is_empty() {
        return Err(DirectoryError::gateway(
            "inference response is not a numeric embedding",
        ));
    }
    Ok(out)
}
