//! User aggregate.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, UserRole};

use super::{Address, Email, PersonName, Phone, UserStatus, Username};

/// Validated profile fields of a user.
///
/// Grouped so that creation and update share one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: Username,
    pub email: Email,
    pub phone: Phone,
    pub role: UserRole,
    pub status: UserStatus,
    pub name: PersonName,
    pub address: Address,
}

/// A back-office account.
///
/// # Invariants
///
/// - Every profile field passed its value-object validation
/// - `password_hash` is never empty and never the plain-text password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    details: UserDetails,
    password_hash: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// Create a new user.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the password hash is empty
    pub fn new(id: UserId, details: UserDetails, password_hash: String) -> Result<Self, DomainError> {
        Self::ensure_hash(&password_hash)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            details,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        details: UserDetails,
        password_hash: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            details,
            password_hash,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn details(&self) -> &UserDetails {
        &self.details
    }

    pub fn username(&self) -> &Username {
        &self.details.username
    }

    pub fn email(&self) -> &Email {
        &self.details.email
    }

    pub fn phone(&self) -> &Phone {
        &self.details.phone
    }

    pub fn role(&self) -> UserRole {
        self.details.role
    }

    pub fn status(&self) -> UserStatus {
        self.details.status
    }

    pub fn name(&self) -> &PersonName {
        &self.details.name
    }

    pub fn address(&self) -> &Address {
        &self.details.address
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the profile fields.
    ///
    /// Returns true if the email changed, so callers know to re-check
    /// uniqueness.
    pub fn update_details(&mut self, details: UserDetails) -> bool {
        let email_changed = self.details.email != details.email;
        self.details = details;
        self.updated_at = Timestamp::now();
        email_changed
    }

    /// Replace the stored password hash.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the hash is empty
    pub fn change_password_hash(&mut self, password_hash: String) -> Result<(), DomainError> {
        Self::ensure_hash(&password_hash)?;
        self.password_hash = password_hash;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn ensure_hash(hash: &str) -> Result<(), DomainError> {
        if hash.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Password hash must not be empty",
            ));
        }
        Ok(())
    }
}
