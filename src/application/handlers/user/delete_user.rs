//! DeleteUserHandler - Command handler for removing a user.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, UserId};
use crate::domain::user::UserError;
use crate::ports::UserRepository;

use super::UserView;

/// Command to delete a user.
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

pub struct DeleteUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Deletes the user and returns what was removed.
    pub async fn handle(
        &self,
        cmd: DeleteUserCommand,
        metadata: CommandMetadata,
    ) -> Result<UserView, UserError> {
        let user = self
            .repository
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        let actor = metadata.actor().ok_or_else(UserError::forbidden)?;
        if !actor.can_act_on(user.id()) {
            return Err(UserError::forbidden());
        }

        self.repository.delete(user.id()).await?;

        tracing::info!(
            user_id = %user.id(),
            correlation_id = %metadata.correlation_id(),
            "user deleted"
        );

        Ok(UserView::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::{AuthenticatedUser, Repository, UserRole};
    use crate::domain::user::test_support::test_user;

    #[tokio::test]
    async fn admin_deletes_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = test_user("john@example.com");
        repo.save(&user).await.unwrap();

        let view = DeleteUserHandler::new(repo.clone())
            .handle(DeleteUserCommand { user_id: *user.id() }, CommandMetadata::test_admin())
            .await
            .unwrap();

        assert_eq!(view.id, *user.id());
        assert!(!repo.exists(user.id()).await.unwrap());
    }

    #[tokio::test]
    async fn customer_cannot_delete_someone_else() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = test_user("john@example.com");
        repo.save(&user).await.unwrap();
        let metadata = CommandMetadata::for_user(AuthenticatedUser::new(
            UserId::new(),
            "other@example.com",
            UserRole::Customer,
        ));

        let result = DeleteUserHandler::new(repo.clone())
            .handle(DeleteUserCommand { user_id: *user.id() }, metadata)
            .await;

        assert_eq!(result, Err(UserError::Forbidden));
        assert!(repo.exists(user.id()).await.unwrap());
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let id = UserId::new();
        let result = DeleteUserHandler::new(Arc::new(InMemoryUserRepository::new()))
            .handle(DeleteUserCommand { user_id: id }, CommandMetadata::test_admin())
            .await;
        assert_eq!(result, Err(UserError::NotFound(id)));
    }
}
