//! Access token issuing port.

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// An issued access token and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in_secs: u64,
}

/// Issues signed access tokens for authenticated users.
///
/// Tokens issued here must be accepted by the matching `SessionValidator`.
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    ///
    /// - `AuthError::SigningFailed` if the token cannot be encoded
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError>;
}
