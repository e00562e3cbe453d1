//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file and is then overridden by
//! `MOCKER_*` environment variables:
//!
//! | Variable                   | Field                          |
//! |----------------------------|--------------------------------|
//! | `MOCKER_BIND`              | `server.bind`                  |
//! | `MOCKER_CORS_ORIGINS`      | `server.cors_origins` (comma separated) |
//! | `MOCKER_SECRET_KEY`        | `auth.secret_key`              |
//! | `MOCKER_TOKEN_TTL_MINUTES` | `auth.access_token_minutes`    |
//! | `MOCKER_SEED`              | `seed`                         |

use crate::core::error::{ConfigError, MockerError, MockerResult};
use crate::core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,

    /// Load sample users and tasks at startup
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            pagination: PaginationConfig::default(),
            seed: true,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// Token and password settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub secret_key: String,

    /// JWT signing algorithm name (HMAC family)
    pub algorithm: String,

    pub access_token_minutes: i64,

    /// A fixed token accepted as the first stored user
    pub dev_token: Option<String>,

    pub password: PasswordConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: "your-secret-key-here-change-in-production".to_string(),
            algorithm: "HS256".to_string(),
            access_token_minutes: 30,
            dev_token: Some("mock-token-for-development".to_string()),
            password: PasswordConfig::default(),
        }
    }
}

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl PasswordConfig {
    /// Minimal cost parameters, for tests and local seeding
    pub fn fast() -> Self {
        Self {
            memory_cost_kib: 8,
            time_cost: 1,
            parallelism: 1,
        }
    }
}

/// Page size bounds for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> MockerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> MockerResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from an optional file, then apply process environment overrides
    pub fn load(path: Option<&Path>) -> MockerResult<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `MOCKER_*` overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> MockerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("MOCKER_BIND") {
            self.server.bind = bind;
        }
        if let Some(origins) = lookup("MOCKER_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(secret) = lookup("MOCKER_SECRET_KEY") {
            self.auth.secret_key = secret;
        }
        if let Some(ttl) = lookup("MOCKER_TOKEN_TTL_MINUTES") {
            self.auth.access_token_minutes = ttl.parse().map_err(|_| ConfigError::InvalidValue {
                field: "MOCKER_TOKEN_TTL_MINUTES".to_string(),
                value: ttl.clone(),
                message: "expected a whole number of minutes".to_string(),
            })?;
        }
        if let Some(seed) = lookup("MOCKER_SEED") {
            self.seed = parse_bool(&seed).ok_or_else(|| ConfigError::InvalidValue {
                field: "MOCKER_SEED".to_string(),
                value: seed.clone(),
                message: "expected true or false".to_string(),
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> MockerResult<()> {
        let invalid = |field: &str, value: String, message: &str| -> MockerError {
            ConfigError::InvalidValue {
                field: field.to_string(),
                value,
                message: message.to_string(),
            }
            .into()
        };

        if self.auth.secret_key.is_empty() {
            return Err(invalid("auth.secret_key", String::new(), "must not be empty"));
        }
        if self.auth.access_token_minutes <= 0 {
            return Err(invalid(
                "auth.access_token_minutes",
                self.auth.access_token_minutes.to_string(),
                "must be positive",
            ));
        }
        if self.pagination.max_page_size < 1 {
            return Err(invalid(
                "pagination.max_page_size",
                self.pagination.max_page_size.to_string(),
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
