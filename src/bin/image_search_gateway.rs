// src/bin/image_search_gateway.rs
//
// Serves only `POST|OPTIONS /api/image-search`, deployable apart from the API
// server (point the API server at it with IMAGE_SEARCH_GATEWAY_URL).

use person_directory::app::wiring;
use person_directory::infra::{config, telemetry};
use person_directory::transport;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_logging();

    let store = wiring::connect_store().await?;
    let gateway = Arc::new(wiring::build_gateway(reqwest::Client::new(), store)?);
    let app = transport::http::create_gateway_router(transport::http::GatewayState { gateway });

    let bind_addr = config::gateway_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Image search gateway listening on http://{}/api/image-search", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
