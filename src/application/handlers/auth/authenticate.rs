//! AuthenticateHandler - Exchanges email and password for an access token.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;

use crate::application::handlers::password::{hash_password, verify_password};
use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, UserRole};
use crate::domain::user::Email;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

/// Sign-in failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    /// Unknown email or wrong password. The two are not distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials matched but the account may not sign in.
    #[error("User account is {0}")]
    Inactive(String),

    #[error("Authentication failed: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for AuthenticationError {
    fn from(err: DomainError) -> Self {
        AuthenticationError::Infrastructure(err.to_string())
    }
}

impl From<AuthError> for AuthenticationError {
    fn from(err: AuthError) -> Self {
        AuthenticationError::Infrastructure(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticateCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResult {
    pub token: String,
    pub expires_in_secs: u64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

pub struct AuthenticateHandler {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    /// Checked when the email is unknown, so that path does the same work.
    decoy_hash: OnceCell<String>,
}

const DECOY_PASSWORD: &str = "decoy-Pa55word!";

impl AuthenticateHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            password_hasher,
            token_issuer,
            decoy_hash: OnceCell::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: AuthenticateCommand,
    ) -> Result<AuthenticateResult, AuthenticationError> {
        // 1. Find by email; a malformed email cannot match anyone
        let user = match Email::new(&cmd.email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        // 2. Verify password, against the decoy hash when there is no user
        let Some(user) = user else {
            self.verify_decoy(&cmd.password).await?;
            return Err(AuthenticationError::InvalidCredentials);
        };
        if !verify_password(&self.password_hasher, &cmd.password, user.password_hash()).await? {
            tracing::warn!(user_id = %user.id(), "failed sign-in attempt");
            return Err(AuthenticationError::InvalidCredentials);
        }

        // 3. Account must be active
        if !user.status().can_authenticate() {
            return Err(AuthenticationError::Inactive(user.status().as_str().to_string()));
        }

        // 4. Issue token
        let principal = AuthenticatedUser::new(*user.id(), user.email().as_str(), user.role());
        let issued = self.token_issuer.issue(&principal)?;

        tracing::info!(user_id = %user.id(), role = %user.role(), "user signed in");

        Ok(AuthenticateResult {
            token: issued.token,
            expires_in_secs: issued.expires_in_secs,
            email: user.email().to_string(),
            name: user.name().full_name(),
            role: user.role(),
        })
    }

    async fn verify_decoy(&self, password: &str) -> Result<(), AuthenticationError> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| hash_password(&self.password_hasher, DECOY_PASSWORD))
            .await?;
        verify_password(&self.password_hasher, password, decoy).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{JwtTokenService, Pbkdf2PasswordHasher};
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::{Repository, UserId};
    use crate::domain::user::test_support::details_with_email;
    use crate::domain::user::{User, UserStatus};
    use crate::ports::SessionValidator;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PASSWORD: &str = "Str0ng!pass";

    struct CountingHasher {
        inner: Pbkdf2PasswordHasher,
        verifications: AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            self.inner.hash(password)
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, hash)
        }
    }

    fn token_service() -> Arc<JwtTokenService> {
        Arc::new(JwtTokenService::new(
            &SecretString::new("a-test-secret-that-is-long-enough-123".to_string()),
            "backoffice-test",
            60,
        ))
    }

    struct Fixture {
        handler: AuthenticateHandler,
        tokens: Arc<JwtTokenService>,
    }

    async fn fixture(status: UserStatus) -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Pbkdf2PasswordHasher::new(10));
        let tokens = token_service();
        let mut details = details_with_email("john@example.com");
        details.status = status;
        let user = User::new(UserId::new(), details, hasher.hash(PASSWORD).unwrap()).unwrap();
        users.save(&user).await.unwrap();
        Fixture {
            handler: AuthenticateHandler::new(users, hasher, tokens.clone()),
            tokens,
        }
    }

    fn command(email: &str, password: &str) -> AuthenticateCommand {
        AuthenticateCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn issues_token_the_validator_accepts() {
        let f = fixture(UserStatus::Active).await;

        let result = f.handler.handle(command("JOHN@example.com", PASSWORD)).await.unwrap();

        assert_eq!(result.email, "john@example.com");
        assert_eq!(result.name, "John Doe");
        assert_eq!(result.expires_in_secs, 3600);
        let principal = f.tokens.validate(&result.token).await.unwrap();
        assert_eq!(principal.email, "john@example.com");
        assert_eq!(principal.role, UserRole::Customer);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let f = fixture(UserStatus::Active).await;

        let wrong = f.handler.handle(command("john@example.com", "Wr0ng!pass")).await;
        let unknown = f.handler.handle(command("nobody@example.com", PASSWORD)).await;
        let malformed = f.handler.handle(command("not-an-email", PASSWORD)).await;

        assert_eq!(wrong, Err(AuthenticationError::InvalidCredentials));
        assert_eq!(unknown, Err(AuthenticationError::InvalidCredentials));
        assert_eq!(malformed, Err(AuthenticationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn suspended_user_cannot_sign_in() {
        let f = fixture(UserStatus::Suspended).await;

        let result = f.handler.handle(command("john@example.com", PASSWORD)).await;

        assert!(matches!(result, Err(AuthenticationError::Inactive(_))));
    }

    #[tokio::test]
    async fn unknown_email_still_verifies_a_hash() {
        let hasher = Arc::new(CountingHasher {
            inner: Pbkdf2PasswordHasher::new(10),
            verifications: AtomicUsize::new(0),
        });
        let handler = AuthenticateHandler::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher.clone(),
            token_service(),
        );

        let unknown = handler.handle(command("nobody@example.com", PASSWORD)).await;
        let malformed = handler.handle(command("not-an-email", PASSWORD)).await;

        assert_eq!(unknown, Err(AuthenticationError::InvalidCredentials));
        assert_eq!(malformed, Err(AuthenticationError::InvalidCredentials));
        assert_eq!(hasher.verifications.load(Ordering::SeqCst), 2);
    }
}
