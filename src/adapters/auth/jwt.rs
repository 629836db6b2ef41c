//! HS256 JWT adapter.
//!
//! Implements both `TokenIssuer` and `SessionValidator` with one shared
//! secret, so tokens issued at sign-in are accepted by the auth middleware.
//!
//! # Security
//!
//! Validation checks:
//! - **Signature**: HMAC-SHA256 with the configured secret
//! - **Issuer (iss)**: Must match the configured issuer
//! - **Expiry (exp)**: Must be in the future

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Claims carried by back-office access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject - the user ID
    sub: String,
    email: String,
    role: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates HS256 access tokens.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_secs: u64,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, issuer: impl Into<String>, ttl_minutes: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            issuer: issuer.into(),
            ttl_secs: ttl_minutes.saturating_mul(60),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX)),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in_secs: self.ttl_secs,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;
        let role: UserRole = claims.role.parse().map_err(|_| {
            tracing::warn!("Invalid role in token: {}", claims.role);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(id, claims.email, role))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
