// src/bin/api_server.rs

use person_directory::app::wiring;
use person_directory::infra::{config, telemetry};
use person_directory::{transport, DirectoryService, FsBlobStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_logging();

    // --- Store Initialization ---
    let store = wiring::connect_store().await?;

    let storage_dir = config::storage_dir();
    let blobs = Arc::new(FsBlobStore::new(&storage_dir, config::public_storage_url())?);
    info!(dir = %storage_dir, "Photo bucket ready");

    // --- Gateway Initialization ---
    // A remote gateway replaces the local one and its /api/image-search route.
    let (client_gateway, local_gateway) = wiring::select_gateway(
        reqwest::Client::new(),
        store.clone(),
        config::image_search_gateway_url(),
    )?;

    let directory = Arc::new(DirectoryService::new(store, blobs, client_gateway));
    let app_state = transport::http::AppState { directory };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let mut app = transport::http::create_router(app_state).layer(cors);
    if let Some(gateway) = local_gateway {
        app = app.merge(transport::http::create_gateway_router(
            transport::http::GatewayState { gateway },
        ));
    }
    let app = app
        .nest_service("/storage", ServeDir::new(&storage_dir))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()));

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API server listening on http://{}", bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
