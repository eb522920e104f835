use crate::transport::http::handlers::common::{bad_request, error_response, json_422, read_form};
use crate::transport::http::types::{ApiResponse, AppState, SearchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching records (`data.results`)", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Store query failed", body = ApiResponse)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"term\": \"...\"}").into_response(),
    };

    match state.directory.search(&request.term).await {
        Ok(results) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({ "results": results }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/search/image",
    request_body(content = crate::transport::http::types::ImageSearchForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Gateway results (`data.results`)", body = ApiResponse),
        (status = 400, description = "No image attached", body = ApiResponse),
        (status = 502, description = "Temporary upload failed", body = ApiResponse),
        (status = 500, description = "Gateway failed", body = ApiResponse)
    )
)]
pub async fn image_search_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let mut form = match read_form(multipart).await {
        Ok(f) => f,
        Err(e) => return bad_request(e).into_response(),
    };
    let Some(image) = form.take_file("image").filter(|f| !f.bytes.is_empty()) else {
        return bad_request("An image file is required (multipart field 'image')").into_response();
    };

    match state.directory.image_search(image).await {
        Ok(results) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({ "results": results }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
