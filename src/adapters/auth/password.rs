//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Hashes are PHC strings (`$pbkdf2-sha256$i=<rounds>,l=32$<salt>$<hash>`).
//! The round count travels with the hash so it can be raised without
//! invalidating existing passwords.

use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

pub const DEFAULT_ROUNDS: u32 = 100_000;
const OUTPUT_LENGTH: usize = 32;

/// Password hasher backed by PBKDF2 with HMAC-SHA256.
#[derive(Debug, Clone)]
pub struct Pbkdf2PasswordHasher {
    rounds: u32,
}

impl Pbkdf2PasswordHasher {
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds: rounds.max(1),
        }
    }
}

impl Default for Pbkdf2PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params {
            rounds: self.rounds,
            output_length: OUTPUT_LENGTH,
        };

        Pbkdf2
            .hash_password_customized(password.as_bytes(), None, None, params, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Password hashing failed: {}", e),
                )
            })
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Pbkdf2PasswordHasher {
        Pbkdf2PasswordHasher::new(1_000)
    }

    #[test]
    fn hash_then_verify() {
        let hash = hasher().hash("Str0ng!pass").unwrap();
        assert!(hash.starts_with("$pbkdf2-sha256$i=1000,l=32$"));
        assert!(hasher().verify("Str0ng!pass", &hash));
        assert!(!hasher().verify("Str0ng!pasS", &hash));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hasher().hash("Str0ng!pass").unwrap();
        let b = hasher().hash("Str0ng!pass").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_uses_rounds_from_hash() {
        let hash = Pbkdf2PasswordHasher::new(10).hash("Str0ng!pass").unwrap();
        assert!(hasher().verify("Str0ng!pass", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hashes() {
        for bad in [
            "",
            "plain",
            "pbkdf2-sha256$1000$00$00",
            "$md5$i=1,l=32$c2FsdHNhbHQ$aGFzaA",
            "$pbkdf2-sha256$i=1000,l=32$",
        ] {
            assert!(!hasher().verify("anything", bad), "accepted {:?}", bad);
        }
    }
}
