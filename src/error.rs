//! Typed errors and HTTP mapping.

use crate::response::ErrorEnvelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("storage: {0}")]
    Storage(sqlx::Error),
}

/// Errors the database raises because of the values it was handed: SQLSTATE class 22 (data
/// exception) and 23503 (foreign key violation). Everything else stays a storage failure.
fn rejected_input(code: &str, message: &str, constraint: Option<&str>) -> Option<String> {
    if code.starts_with("22") {
        return Some(format!("invalid value: {}", message));
    }
    if code == "23503" {
        return Some(format!(
            "referenced row does not exist ({})",
            constraint.unwrap_or("foreign key")
        ));
    }
    None
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if let Some(code) = db.code() {
                if let Some(reason) = rejected_input(&code, db.message(), db.constraint()) {
                    return AppError::Validation(reason);
                }
            }
        }
        AppError::Storage(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Storage(_) => "storage_error",
        }
    }

    /// Message safe to hand to a client. Driver errors can carry statement or connection details.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage(_) => "storage failure".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorEnvelope::new(status, self.code(), self.public_message());
        (status, Json(body)).into_response()
    }
}
