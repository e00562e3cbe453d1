//! Response envelopes
//!
//! Every endpoint answers with the same outer shape:
//!
//! ```json
//! { "code": 200, "message": "success", "success": true, "data": ... }
//! ```
//!
//! The `data` key is left out when there is no payload. List endpoints use
//! [`PaginatedResponse`], which always carries `data`, `total`, `page` and
//! `pageSize`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default envelope message
pub const SUCCESS: &str = "success";

/// Code, message and success flag shared by every envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    pub success: bool,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: 200,
            message: message.into(),
            success: true,
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            success: false,
        }
    }

    fn status(&self) -> StatusCode {
        http_status(self.code)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::ok(SUCCESS)
    }
}

/// HTTP status for an envelope `code`; codes outside the valid range map to 200
fn http_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::OK)
}

/// Single-result envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build an envelope from all of its parts
    pub fn new(data: Option<T>, message: impl Into<String>, code: u16, success: bool) -> Self {
        Self {
            code,
            message: message.into(),
            success,
            data,
        }
    }

    /// Successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self::new(Some(data), SUCCESS, 200, true)
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl ApiResponse<Value> {
    /// Successful envelope with a message and no payload
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(None, message, 200, true)
    }

    /// Error envelope with no payload
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self::new(None, message, code, false)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (http_status(self.code), Json(self)).into_response()
    }
}

/// Paginated list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub code: u16,
    pub message: String,
    pub success: bool,
    pub data: Vec<T>,

    /// Number of matching items before pagination
    pub total: usize,

    pub page: i64,

    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: usize, page: i64, page_size: i64) -> Self {
        Self {
            code: 200,
            message: SUCCESS.to_string(),
            success: true,
            data,
            total,
            page,
            page_size,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: Serialize> IntoResponse for PaginatedResponse<T> {
    fn into_response(self) -> Response {
        (http_status(self.code), Json(self)).into_response()
    }
}

/// An envelope extended with operation-specific top-level keys
///
/// Used by bulk and batch operations whose counters sit next to `code`,
/// `message` and `success` instead of under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report<E> {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(flatten)]
    pub detail: E,
}

impl<E> Report<E> {
    pub fn new(message: impl Into<String>, detail: E) -> Self {
        Self {
            envelope: Envelope::ok(message),
            detail,
        }
    }
}

impl<E: Serialize> IntoResponse for Report<E> {
    fn into_response(self) -> Response {
        (self.envelope.status(), Json(self)).into_response()
    }
}
