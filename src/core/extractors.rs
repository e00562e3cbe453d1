//! Axum extractors for request bodies and bearer credentials
//!
//! - [`ValidatedJson`] decodes a JSON body into a typed request and runs its
//!   `validator` constraints before the handler sees it.
//! - [`BearerToken`] pulls the token out of an `Authorization: Bearer` header.

use crate::core::error::{MockerError, RequestError, ValidationError};
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use validator::Validate;

/// A JSON body that has been decoded and validated
///
/// An empty body is read as `{}`, so requests whose fields all have
/// defaults can be sent without one.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_user(
///     State(state): State<AppState>,
///     ValidatedJson(request): ValidatedJson<CreateUserRequest>,
/// ) -> MockerResult<Json<User>> {
///     // request.user_data already passed its length/email checks
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = MockerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestError::Malformed {
                message: e.body_text(),
            })?;

        let value = decode::<T>(&bytes)?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Decode a body, mapping syntax problems to 400 and shape problems to 422
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, MockerError> {
    let body = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        bytes
    };

    serde_json::from_slice(body).map_err(|e| match e.classify() {
        Category::Data => ValidationError::InvalidJson {
            message: e.to_string(),
        }
        .into(),
        Category::Syntax | Category::Eof | Category::Io => RequestError::Malformed {
            message: e.to_string(),
        }
        .into(),
    })
}

/// The raw token from an `Authorization: Bearer <token>` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = MockerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| MockerError::unauthorized("Not authenticated"))?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MockerError::unauthorized("Not authenticated"))?;

        Ok(BearerToken(token.to_string()))
    }
}
