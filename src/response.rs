//! Response envelope: every body carries the HTTP status it was sent with.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize, Debug)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub error: ErrorDetail,
}

#[derive(Serialize, Debug)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, code: &str, message: String) -> Self {
        ErrorEnvelope {
            status: status.as_u16(),
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CreatedId {
    pub id: i64,
}

pub fn success_data<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: StatusCode::OK.as_u16(),
        data: Some(data),
    })
}

/// `{"status":200}` with no data key.
pub fn success_empty() -> Json<Envelope<()>> {
    Json(Envelope {
        status: StatusCode::OK.as_u16(),
        data: None,
    })
}
