//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("duplicate context path: {0}")]
    DuplicateContextPath(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Faults raised below the service layer: pool acquisition, statement execution, row decoding.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("connection unavailable: {0}")]
    ConnectionUnavailable(#[source] sqlx::Error),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("column {column}: {reason}")]
    Decode { column: String, reason: String },
}

impl StoreError {
    pub fn decode(column: &str, reason: impl Into<String>) -> Self {
        StoreError::Decode {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    /// Backend-specific error code (SQLSTATE for PostgreSQL, extended result code for SQLite).
    pub fn code(&self) -> Option<String> {
        match self {
            StoreError::Db(sqlx::Error::Database(e)) => e.code().map(|c| c.into_owned()),
            _ => None,
        }
    }
}

/// Outcome of a generic entity service call that did not produce a value.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    ValidationFailed(String),
    #[error("no rows affected")]
    NoRowsAffected,
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::ValidationFailed(msg.into())
    }
}

/// Errors surfaced to HTTP clients. Bodies are plain text.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        crate::response::text(self.status(), self.to_string())
    }
}
