//! CreateUserHandler - Command handler for registering users.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, UserId, UserRole};
use crate::domain::user::{validate_password, User, UserError, UserStatus};
use crate::application::handlers::password::hash_password;
use crate::ports::{PasswordHasher, UserRepository};

use super::{UserProfileInput, UserView};

/// Command to create a user.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub profile: UserProfileInput,
    pub password: String,
    /// Defaults to `Customer`. Any other role needs an admin caller.
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

/// Handler for creating users.
pub struct CreateUserHandler {
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl CreateUserHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateUserCommand,
        metadata: CommandMetadata,
    ) -> Result<UserView, UserError> {
        // 1. Only admins hand out elevated roles or non-default status
        let role = cmd.role.unwrap_or_default();
        let status = cmd.status.unwrap_or_default();
        let is_admin = metadata.actor().map_or(false, |a| a.role.is_admin());
        if (role != UserRole::Customer || status != UserStatus::Active) && !is_admin {
            return Err(UserError::forbidden());
        }

        // 2. Validate input
        validate_password(&cmd.password)?;
        let details = cmd.profile.into_details(role, status)?;

        // 3. Email must be unique
        if self.repository.email_exists(&details.email).await? {
            return Err(UserError::duplicate_email(details.email.as_str()));
        }

        // 4. Hash and persist
        let hash = hash_password(&self.password_hasher, &cmd.password).await?;
        let user = User::new(UserId::new(), details, hash)?;
        self.repository.save(&user).await?;

        tracing::info!(
            user_id = %user.id(),
            role = %user.role(),
            correlation_id = %metadata.correlation_id(),
            "user created"
        );

        Ok(UserView::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::Pbkdf2PasswordHasher;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::application::handlers::user::profile_input;
    use crate::domain::foundation::{AuthenticatedUser, Repository};

    fn handler(repo: Arc<InMemoryUserRepository>) -> CreateUserHandler {
        CreateUserHandler::new(repo, Arc::new(Pbkdf2PasswordHasher::new(10)))
    }

    fn command(email: &str) -> CreateUserCommand {
        CreateUserCommand {
            profile: profile_input(email),
            password: "Str0ng!pass".to_string(),
            role: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn creates_customer_with_hashed_password() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = handler(repo.clone());

        let view = handler
            .handle(command("John@Example.com"), CommandMetadata::anonymous())
            .await
            .unwrap();

        assert_eq!(view.email, "john@example.com");
        assert_eq!(view.role, UserRole::Customer);
        let stored = repo.find_by_id(&view.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash(), "Str0ng!pass");
        assert!(stored.password_hash().starts_with("$pbkdf2-sha256$"));
    }

    #[tokio::test]
    async fn rejects_duplicate_email_case_insensitively() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = handler(repo);
        handler
            .handle(command("john@example.com"), CommandMetadata::anonymous())
            .await
            .unwrap();

        let result = handler
            .handle(command("JOHN@example.com"), CommandMetadata::anonymous())
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn rejects_weak_password() {
        let handler = handler(Arc::new(InMemoryUserRepository::new()));
        let mut cmd = command("john@example.com");
        cmd.password = "password".to_string();

        let result = handler.handle(cmd, CommandMetadata::anonymous()).await;

        assert!(matches!(
            result,
            Err(UserError::ValidationFailed { ref field, .. }) if field == "password"
        ));
    }

    #[tokio::test]
    async fn anonymous_caller_cannot_create_admin() {
        let handler = handler(Arc::new(InMemoryUserRepository::new()));
        let mut cmd = command("root@example.com");
        cmd.role = Some(UserRole::Admin);

        let result = handler.handle(cmd, CommandMetadata::anonymous()).await;

        assert!(matches!(result, Err(UserError::Forbidden)));
    }

    #[tokio::test]
    async fn admin_can_create_manager() {
        let handler = handler(Arc::new(InMemoryUserRepository::new()));
        let mut cmd = command("boss@example.com");
        cmd.role = Some(UserRole::Manager);

        let view = handler.handle(cmd, CommandMetadata::test_admin()).await.unwrap();

        assert_eq!(view.role, UserRole::Manager);
    }

    #[tokio::test]
    async fn customer_cannot_create_manager() {
        let handler = handler(Arc::new(InMemoryUserRepository::new()));
        let mut cmd = command("boss@example.com");
        cmd.role = Some(UserRole::Manager);
        let metadata = CommandMetadata::for_user(AuthenticatedUser::new(
            UserId::new(),
            "c@example.com",
            UserRole::Customer,
        ));

        let result = handler.handle(cmd, metadata).await;

        assert!(matches!(result, Err(UserError::Forbidden)));
    }
}
