//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a JWT token.
//! They have **no external dependencies**: the token adapter populates them
//! via the `SessionValidator` port.

use super::{UserId, UserRole};
use thiserror::Error;

/// Authenticated user extracted from a validated JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user identifier carried in the `sub` claim.
    pub id: UserId,

    /// User's email address from the token claims.
    pub email: String,

    /// Role at the time the token was issued.
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    /// True when the user may act on the account identified by `target`.
    pub fn can_act_on(&self, target: &UserId) -> bool {
        &self.id == target || self.role.is_admin()
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token could not be produced.
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_can_act_on_self() {
        let id = UserId::new();
        let user = AuthenticatedUser::new(id, "a@example.com", UserRole::Customer);
        assert!(user.can_act_on(&id));
        assert!(!user.can_act_on(&UserId::new()));
    }

    #[test]
    fn admin_can_act_on_anyone() {
        let admin = AuthenticatedUser::new(UserId::new(), "root@example.com", UserRole::Admin);
        assert!(admin.can_act_on(&UserId::new()));
    }
}
