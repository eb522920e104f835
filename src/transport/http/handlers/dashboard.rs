use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Counts and the 5 most recent searches; failed sections are defaulted and listed in `data.failures`", body = ApiResponse)
    )
)]
pub async fn dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.directory.dashboard().await;
    match serde_json::to_value(&snapshot) {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err(format!("Failed to encode dashboard: {}", e))),
        )
            .into_response(),
    }
}
