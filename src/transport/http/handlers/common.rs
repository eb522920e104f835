use crate::domain::{DirectoryError, ImageFile};
use crate::transport::http::types::ApiResponse;
use axum::extract::multipart::{Field, Multipart};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use std::collections::HashMap;

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::err(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}

pub fn status_for(err: &DirectoryError) -> StatusCode {
    match err {
        DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
        DirectoryError::Upload(_) => StatusCode::BAD_GATEWAY,
        DirectoryError::Query(_) | DirectoryError::Gateway { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn error_response(err: DirectoryError) -> (StatusCode, Json<ApiResponse>) {
    (status_for(&err), Json(ApiResponse::err(err.to_string())))
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::err(message)))
}

/// Text fields and file parts of a multipart form.
#[derive(Default)]
pub struct FormParts {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, ImageFile>,
}

impl FormParts {
    pub fn take_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<ImageFile> {
        self.files.remove(name)
    }
}

async fn read_file(field: Field<'_>, file_name: String) -> Result<Option<ImageFile>, String> {
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| format!("Invalid multipart body: {}", e))?;
    // Browsers submit an empty, unnamed part when no file was chosen.
    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ImageFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

pub async fn read_form(mut multipart: Multipart) -> Result<FormParts, String> {
    let mut parts = FormParts::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid multipart body: {}", e))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                if let Some(file) = read_file(field, file_name).await? {
                    parts.files.insert(name, file);
                }
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| format!("Invalid multipart body: {}", e))?;
                parts.fields.insert(name, value);
            }
        }
    }
    Ok(parts)
}
