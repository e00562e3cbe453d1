//! HTTP handlers
//!
//! Handlers take typed bodies through [`ValidatedJson`](crate::core::ValidatedJson)
//! and return [`MockerResult`](crate::core::MockerResult), so every failure
//! leaves as the standard error envelope.

pub mod auth;
pub mod tasks;
pub mod users;

use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Mock API Server is running" }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "mock-api-server"
    }))
}
