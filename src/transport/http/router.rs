use crate::app::dashboard::{DashboardFailure, DashboardSection, DashboardSnapshot};
use crate::app::gateway::{GatewayErrorBody, ImageSearchRequest, ImageSearchResponse};
use crate::domain::{PersonRecord, SearchLogEntry, SearchType};
use crate::transport::http::handlers::{dashboard, gateway, health, persons, search};
use crate::transport::http::types::{
    AddPersonForm, ApiResponse, AppState, GatewayState, ImageSearchForm, SearchRequest,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Upper bound for multipart uploads (photos and image-search queries).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        search::search_handler,
        search::image_search_handler,
        persons::add_person_handler,
        dashboard::dashboard_handler,
        gateway::image_search_gateway_handler,
        gateway::image_search_preflight_handler
    ),
    components(schemas(
        ApiResponse,
        SearchRequest,
        AddPersonForm,
        ImageSearchForm,
        PersonRecord,
        SearchLogEntry,
        SearchType,
        DashboardSnapshot,
        DashboardFailure,
        DashboardSection,
        ImageSearchRequest,
        ImageSearchResponse,
        GatewayErrorBody
    ))
)]
pub struct ApiDoc;

/// Public search, admin and dashboard routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/search", post(search::search_handler))
        .route("/api/search/image", post(search::image_search_handler))
        .route("/api/persons", post(persons::add_person_handler))
        .route("/api/dashboard", get(dashboard::dashboard_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(app_state)
}

/// The image-search gateway. Carries its own CORS headers; do not wrap it in
/// a `CorsLayer`.
pub fn create_gateway_router(gateway_state: GatewayState) -> Router {
    Router::new()
        .route(
            "/api/image-search",
            post(gateway::image_search_gateway_handler)
                .options(gateway::image_search_preflight_handler),
        )
        .with_state(gateway_state)
}
