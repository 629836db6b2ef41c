//! Mock authentication adapters for testing.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_user("valid-token", AuthenticatedUser::new(
//!         UserId::new(),
//!         "test@example.com",
//!         UserRole::Admin,
//!     ));
//!
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens
            .write()
            .expect("MockSessionValidator: tokens lock poisoned")
            .insert(token.into(), user);
        self
    }

    /// Adds a token for a fresh user with the given role.
    pub fn with_role(self, token: impl Into<String>, role: UserRole) -> Self {
        let token = token.into();
        let user = AuthenticatedUser::new(
            UserId::new(),
            format!("{}@test.example.com", token),
            role,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .expect("MockSessionValidator: error lock poisoned") = Some(error);
        self
    }

    /// Returns the user registered for a token.
    pub fn user_for(&self, token: &str) -> Option<AuthenticatedUser> {
        self.tokens
            .read()
            .expect("MockSessionValidator: tokens lock poisoned")
            .get(token)
            .cloned()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .expect("MockSessionValidator: error lock poisoned")
            .clone()
        {
            return Err(error);
        }
        self.user_for(token).ok_or(AuthError::InvalidToken)
    }
}
