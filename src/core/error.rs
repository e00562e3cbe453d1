//! Typed error handling for the mock API
//!
//! Handlers return [`MockerResult`]; every error renders as the standard
//! envelope with `success: false` and the matching HTTP status:
//!
//! ```json
//! { "code": 404, "message": "User not found", "success": false }
//! ```
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups, uniqueness and references between records
//! - [`ValidationError`]: request bodies that fail their constraints
//! - [`RequestError`]: malformed requests and failed authentication
//! - [`ConfigError`]: configuration loading
//! - `Storage` / `Internal`: failures that are not the caller's fault

use crate::core::service::UniqueViolation;
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// The main error type
#[derive(Debug, Error)]
pub enum MockerError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Record store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MockerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MockerError::Entity(e) => e.status_code(),
            MockerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MockerError::Request(e) => e.status_code(),
            MockerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MockerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MockerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MockerError::Entity(e) => e.error_code(),
            MockerError::Validation(_) => "VALIDATION_ERROR",
            MockerError::Request(e) => e.error_code(),
            MockerError::Config(_) => "CONFIG_ERROR",
            MockerError::Storage(_) => "STORAGE_ERROR",
            MockerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error envelope
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.status_code().as_u16(),
            message: self.to_string(),
            success: false,
            data: self.details(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            MockerError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(json!({ "error": self.error_code(), "fields": errors }))
            }
            MockerError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(json!({ "error": self.error_code(), "entity_type": entity_type, "id": id }))
            }
            _ => None,
        }
    }

    /// Shorthand for a missing record
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
        .into()
    }

    /// Shorthand for a failed authentication
    pub fn unauthorized(message: impl Into<String>) -> Self {
        RequestError::Unauthorized {
            message: message.into(),
        }
        .into()
    }
}

/// Error envelope written to the response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl IntoResponse for MockerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "request rejected");
        }

        let mut response = (status, Json(self.to_response())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// No record with this id
    #[error("{entity_type} not found")]
    NotFound { entity_type: String, id: String },

    /// A unique field collides with an existing record
    #[error("{field} already exists")]
    Duplicate { entity_type: String, field: String },

    /// A field refers to a record that does not exist
    #[error("{field} references a {entity_type} that does not exist")]
    InvalidReference { field: String, entity_type: String },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            EntityError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Duplicate { .. } => "ENTITY_DUPLICATE",
            EntityError::InvalidReference { .. } => "INVALID_REFERENCE",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed their constraints
    #[error("Validation errors: {}", join_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body could not be decoded into the expected shape
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

/// Flatten nested validator errors into dotted field paths
fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldValidationError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for MockerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        MockerError::Validation(errors.into())
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Request could not be understood
    #[error("Invalid request: {message}")]
    Malformed { message: String },

    /// Missing or invalid credentials
    #[error("{message}")]
    Unauthorized { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Malformed { .. } => StatusCode::BAD_REQUEST,
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Malformed { .. } => "MALFORMED_REQUEST",
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration file
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A value is present but unusable
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    Io { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{f}'"))
        .unwrap_or_default()
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for MockerError {
    fn from(err: serde_json::Error) -> Self {
        MockerError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for MockerError {
    fn from(err: serde_yaml::Error) -> Self {
        MockerError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for MockerError {
    fn from(err: std::io::Error) -> Self {
        MockerError::Config(ConfigError::Io {
            message: err.to_string(),
        })
    }
}

/// Storage implementations report through `anyhow`
///
/// A [`UniqueViolation`] inside the error becomes a duplicate entity error;
/// anything else is a storage failure.
impl From<anyhow::Error> for MockerError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<UniqueViolation>() {
            Some(violation) => EntityError::Duplicate {
                entity_type: violation.entity_type.to_string(),
                field: violation.field.to_string(),
            }
            .into(),
            None => MockerError::Storage(format!("{err:#}")),
        }
    }
}

/// A specialized Result type for handlers and services
pub type MockerResult<T> = Result<T, MockerError>;
