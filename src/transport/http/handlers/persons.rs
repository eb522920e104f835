use crate::domain::NewPerson;
use crate::transport::http::handlers::common::{bad_request, error_response, read_form};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/persons",
    request_body(content = crate::transport::http::types::AddPersonForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Person created (`data.person`)", body = ApiResponse),
        (status = 400, description = "Missing name or malformed form", body = ApiResponse),
        (status = 502, description = "Photo upload failed, nothing was saved", body = ApiResponse),
        (status = 500, description = "Insert failed", body = ApiResponse)
    )
)]
pub async fn add_person_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let mut form = match read_form(multipart).await {
        Ok(f) => f,
        Err(e) => return bad_request(e).into_response(),
    };

    let person = NewPerson {
        name: form.take_field("name").unwrap_or_default(),
        address: form.take_field("address"),
        phone_number: form.take_field("phone_number"),
        email: form.take_field("email"),
        social_media: form.take_field("social_media"),
        nid_number: form.take_field("nid_number"),
    };
    let photo = form.take_file("photo");

    match state.directory.add_person(person, photo).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(serde_json::json!({ "person": record }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
