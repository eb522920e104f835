//! `POST|OPTIONS /api/image-search`: the serverless-function contract.
//!
//! Answers are plain JSON (no `ApiResponse` envelope) and always carry open
//! CORS headers, since browsers call the gateway from another origin.

use crate::app::gateway::{GatewayErrorBody, ImageSearchRequest, ImageSearchResponse};
use crate::domain::DirectoryError;
use crate::transport::http::types::GatewayState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    ]
}

fn failure(err: DirectoryError) -> Response {
    error!(error = %err, "image search failed");
    let body = match err {
        DirectoryError::Gateway { message, details } => GatewayErrorBody {
            error: message,
            details,
        },
        other => GatewayErrorBody {
            error: "An unexpected error occurred".to_string(),
            details: other.to_string(),
        },
    };
    (StatusCode::INTERNAL_SERVER_ERROR, cors_headers(), Json(body)).into_response()
}

#[utoipa::path(
    options,
    path = "/api/image-search",
    responses((status = 204, description = "CORS pre-flight, open to any origin"))
)]
pub async fn image_search_preflight_handler() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, cors_headers())
}

#[utoipa::path(
    post,
    path = "/api/image-search",
    request_body = ImageSearchRequest,
    responses(
        (status = 200, description = "Up to 10 records (not ranked by the image)", body = ImageSearchResponse),
        (status = 500, description = "Fetch, inference or store failure", body = GatewayErrorBody)
    )
)]
pub async fn image_search_gateway_handler(
    State(state): State<GatewayState>,
    request: Result<Json<ImageSearchRequest>, JsonRejection>,
) -> Response {
    let request = match request {
        Ok(Json(r)) => r,
        Err(e) => return failure(DirectoryError::gateway(e.body_text())),
    };

    match state.gateway.search(&request.image_url).await {
        Ok(results) => (
            StatusCode::OK,
            cors_headers(),
            Json(ImageSearchResponse { results }),
        )
            .into_response(),
        Err(e) => failure(e),
    }
}
