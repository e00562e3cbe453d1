//! Login, profile and logout

use crate::core::error::{MockerError, MockerResult};
use crate::core::extractors::ValidatedJson;
use crate::core::response::ApiResponse;
use crate::entities::UserProfile;
use crate::server::state::{AppState, CurrentUser};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Credentials posted to `/login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Routes mounted under `/api/auth`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/profile", get(profile))
        .route("/api/auth/logout", post(logout))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> MockerResult<Json<Token>> {
    let rejected = || MockerError::unauthorized("Incorrect username or password");

    let user = state
        .users
        .find_first("username", &request.username)
        .await?
        .ok_or_else(rejected)?;

    if !state
        .verify_password(request.password, user.hashed_password.clone())
        .await?
    {
        tracing::info!(username = %request.username, "login rejected");
        return Err(rejected());
    }

    let access_token = state.tokens.issue(&user.username)?;
    tracing::info!(username = %user.username, "login succeeded");

    Ok(Json(Token {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn profile(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(user.profile())
}

/// Tokens are stateless; the client simply discards it
pub async fn logout(CurrentUser(user): CurrentUser) -> ApiResponse<Value> {
    tracing::info!(username = %user.username, "logout");
    ApiResponse::message("Logged out successfully")
}
