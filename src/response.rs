//! Response helpers: JSON payloads for entities, plain text for status messages.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Pre-serialized JSON body. The wire mapper already produced the text.
pub fn json(status: StatusCode, body: String) -> Response {
    (status, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response()
}

pub fn text(status: StatusCode, message: impl Into<String>) -> Response {
    (status, [(CONTENT_TYPE, TEXT_CONTENT_TYPE)], message.into()).into_response()
}

pub fn updated_rows(rows: u64) -> Response {
    text(StatusCode::OK, format!("Updated rows: {}", rows))
}

pub fn deleted_rows(rows: u64) -> Response {
    text(StatusCode::OK, format!("Deleted rows: {}", rows))
}
