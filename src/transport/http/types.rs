use crate::app::directory_service::DirectoryService;
use crate::app::gateway::SearchGateway;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryService>,
}

#[derive(Clone)]
pub struct GatewayState {
    pub gateway: Arc<SearchGateway>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchRequest {
    /// Free text matched against name, address, phone number, email and NID
    /// number. Empty matches every record.
    #[serde(default)]
    pub term: String,
}

/// Multipart form accepted by `POST /api/persons` (documentation only).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct AddPersonForm {
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub social_media: Option<String>,
    pub nid_number: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo: Option<Vec<u8>>,
}

/// Multipart form accepted by `POST /api/search/image` (documentation only).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ImageSearchForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
