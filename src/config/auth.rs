//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest signing key accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 access tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing key for access tokens
    pub jwt_secret: SecretString,

    /// `iss` claim written into and required from tokens
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production the signing key must be at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES));
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("JWT_ISSUER"));
        }
        if self.token_ttl_minutes == 0 || self.token_ttl_minutes > 1440 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "backoffice".to_string()
}

fn default_token_ttl() -> u64 {
    60
}
