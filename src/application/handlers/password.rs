//! Password hashing on the blocking pool.
//!
//! Key derivation is deliberately slow, so handlers never call the
//! `PasswordHasher` port directly from an async task.

use std::sync::Arc;

use tokio::task::spawn_blocking;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

pub(crate) async fn hash_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
) -> Result<String, DomainError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_owned();
    spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(join_failed)?
}

pub(crate) async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
    hash: &str,
) -> Result<bool, DomainError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_owned();
    let hash = hash.to_owned();
    spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(join_failed)
}

fn join_failed(err: tokio::task::JoinError) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("Password hashing task failed: {}", err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::Pbkdf2PasswordHasher;

    #[tokio::test]
    async fn hashes_and_verifies_off_the_runtime() {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Pbkdf2PasswordHasher::new(10));

        let hash = hash_password(&hasher, "Str0ng!pass").await.unwrap();

        assert!(verify_password(&hasher, "Str0ng!pass", &hash).await.unwrap());
        assert!(!verify_password(&hasher, "Wr0ng!pass", &hash).await.unwrap());
    }
}
