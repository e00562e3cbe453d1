//! Shared application state and the authenticated-user extractor

use crate::config::AppConfig;
use crate::core::auth::{PasswordHasher, TokenIssuer};
use crate::core::error::{MockerError, MockerResult};
use crate::core::extractors::BearerToken;
use crate::core::service::DataService;
use crate::entities::{Task, User};
use crate::storage::InMemoryDataService;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn DataService<User>>,
    pub tasks: Arc<dyn DataService<Task>>,
    pub config: Arc<AppConfig>,
    pub passwords: PasswordHasher,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// State backed by empty in-memory stores
    pub fn new(config: AppConfig) -> MockerResult<Self> {
        Self::with_services(
            config,
            Arc::new(InMemoryDataService::<User>::new()),
            Arc::new(InMemoryDataService::<Task>::new()),
        )
    }

    /// State backed by the given stores
    pub fn with_services(
        config: AppConfig,
        users: Arc<dyn DataService<User>>,
        tasks: Arc<dyn DataService<Task>>,
    ) -> MockerResult<Self> {
        config.validate()?;
        let passwords = PasswordHasher::new(config.auth.password)?;
        let tokens = TokenIssuer::new(&config.auth)?;

        Ok(Self {
            users,
            tasks,
            config: Arc::new(config),
            passwords,
            tokens,
        })
    }

    /// Hash a password off the async executor
    pub async fn hash_password(&self, password: String) -> MockerResult<String> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| MockerError::Internal(format!("Password hashing task failed: {e}")))?
    }

    /// Verify a password off the async executor
    pub async fn verify_password(&self, password: String, hash: String) -> MockerResult<bool> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
            .await
            .map_err(|e| MockerError::Internal(format!("Password check task failed: {e}")))
    }

    /// Resolve a bearer token to a stored user
    ///
    /// The configured development token stands for the first stored user;
    /// any other token must be a valid access token whose subject names an
    /// existing username.
    pub async fn authenticate(&self, token: &str) -> MockerResult<User> {
        let user = if self.config.auth.dev_token.as_deref() == Some(token) {
            self.users.first().await?
        } else {
            match self.tokens.verify(token) {
                Some(username) => self.users.find_first("username", &username).await?,
                None => None,
            }
        };

        user.ok_or_else(|| MockerError::unauthorized("Could not validate credentials"))
    }
}

/// The user behind the request's bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = MockerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let user = state.authenticate(&token).await?;
        tracing::debug!(username = %user.username, "authenticated request");
        Ok(CurrentUser(user))
    }
}
