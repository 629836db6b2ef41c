//! Password hashing port.
//!
//! Keeps the key-derivation scheme out of the application layer. Hashes are
//! self-describing strings so the scheme can change without a migration.

use crate::domain::foundation::DomainError;

/// Hashes and verifies user passwords.
///
/// Hashing is CPU-bound and synchronous. Handlers call it through
/// `spawn_blocking`, so implementations must be `Send + Sync + 'static`.
pub trait PasswordHasher: Send + Sync {
    /// Derive a storable hash from a plain-text password.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the platform cannot produce randomness
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plain-text password against a stored hash.
    ///
    /// Returns `false` for a wrong password or an unrecognized hash format.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hasher_is_object_safe() {
        fn _accepts_dyn(_hasher: &dyn PasswordHasher) {}
    }
}
