//! User repository port.
//!
//! Extends the base `Repository` contract with the email lookups that
//! registration, profile updates and sign-in need.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Repository, UserId};
use crate::domain::user::{Email, User};

/// Fields users may be ordered by.
pub const USER_SORT_FIELDS: &[&str] = &["username", "email", "created_at"];

/// Repository port for User aggregate persistence.
///
/// Implementations must:
/// - Compare emails case-insensitively (`Email` is already normalized)
/// - Return `UserNotFound` from `update`/`delete` when the user is missing
#[async_trait]
pub trait UserRepository: Repository<User, UserId> {
    /// Find a user by email.
    ///
    /// Returns `None` if no user has this email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Check whether any user has this email.
    async fn email_exists(&self, email: &Email) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
