//! Password hashing and access tokens
//!
//! Passwords are stored as Argon2id PHC strings. Access tokens are HMAC
//! signed JWTs whose `sub` claim is the username.
//!
//! # Example
//!
//! ```rust,ignore
//! let hasher = PasswordHasher::new(config.password)?;
//! let hash = hasher.hash("admin123")?;
//! assert!(hasher.verify("admin123", &hash));
//!
//! let tokens = TokenIssuer::new(&config)?;
//! let token = tokens.issue("superadmin")?;
//! assert_eq!(tokens.verify(&token).as_deref(), Some("superadmin"));
//! ```

use crate::config::{AuthConfig, PasswordConfig};
use crate::core::error::{ConfigError, MockerError, MockerResult};
use argon2::{
    Algorithm as ArgonAlgorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Argon2id password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(config: PasswordConfig) -> MockerResult<Self> {
        let params = Params::new(
            config.memory_cost_kib,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| ConfigError::InvalidValue {
            field: "auth.password".to_string(),
            value: format!("{config:?}"),
            message: e.to_string(),
        })?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(ArgonAlgorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password into a PHC string
    pub fn hash(&self, password: &str) -> MockerResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| MockerError::Internal(format!("Failed to hash password: {e}")))
    }

    /// Verify a password against a PHC string
    ///
    /// Malformed hashes never verify.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                self.argon2()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> MockerResult<Self> {
        let algorithm = parse_algorithm(&config.algorithm)?;
        let secret = config.secret_key.as_bytes();

        Ok(Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret)),
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            algorithm,
            lifetime: Duration::minutes(config.access_token_minutes),
        })
    }

    /// Token lifetime
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `subject`
    pub fn issue(&self, subject: &str) -> MockerResult<String> {
        self.issue_with_lifetime(subject, self.lifetime)
    }

    /// Issue a token with an explicit lifetime
    pub fn issue_with_lifetime(&self, subject: &str, lifetime: Duration) -> MockerResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| MockerError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a token and return its subject
    ///
    /// Bad signatures, expired tokens and tokens without a subject all
    /// yield `None`.
    pub fn verify(&self, token: &str) -> Option<String> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .ok()
            .map(|data| data.claims.sub)
            .filter(|sub| !sub.is_empty())
    }
}

fn parse_algorithm(name: &str) -> MockerResult<Algorithm> {
    match Algorithm::from_str(name) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::InvalidValue {
            field: "auth.algorithm".to_string(),
            value: name.to_string(),
            message: "only HS256, HS384 and HS512 are supported".to_string(),
        }
        .into()),
    }
}
