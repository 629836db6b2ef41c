//! UpdateUserHandler - Command handler for editing a user.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, UserId, UserRole};
use crate::domain::user::{validate_password, UserError, UserStatus};
use crate::application::handlers::password::hash_password;
use crate::ports::{PasswordHasher, UserRepository};

use super::{UserProfileInput, UserView};

/// Command to replace a user's profile.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub profile: UserProfileInput,
    /// New password; keeps the current one when absent.
    pub password: Option<String>,
    /// Keeps the current role when absent.
    pub role: Option<UserRole>,
    /// Keeps the current status when absent.
    pub status: Option<UserStatus>,
}

/// Handler for updating users.
pub struct UpdateUserHandler {
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UpdateUserHandler {
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
        cmd: UpdateUserCommand,
        metadata: CommandMetadata,
    ) -> Result<UserView, UserError> {
        // 1. Load user
        let mut user = self
            .repository
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        // 2. Authorize - self or admin; role and status changes are admin only
        let actor = metadata.actor().ok_or_else(UserError::forbidden)?;
        if !actor.can_act_on(user.id()) {
            return Err(UserError::forbidden());
        }
        let role = cmd.role.unwrap_or_else(|| user.role());
        let status = cmd.status.unwrap_or_else(|| user.status());
        if (role != user.role() || status != user.status()) && !actor.role.is_admin() {
            return Err(UserError::forbidden());
        }

        // 3. Validate
        let details = cmd.profile.into_details(role, status)?;
        if let Some(password) = &cmd.password {
            validate_password(password)?;
        }

        // 4. Email must stay unique
        if details.email != *user.email() {
            if let Some(owner) = self.repository.find_by_email(&details.email).await? {
                if owner.id() != user.id() {
                    return Err(UserError::duplicate_email(details.email.as_str()));
                }
            }
        }

        // 5. Apply and persist
        user.update_details(details);
        if let Some(password) = &cmd.password {
            let hash = hash_password(&self.password_hasher, password).await?;
            user.change_password_hash(hash)?;
        }
        self.repository.update(&user).await?;

        tracing::info!(
            user_id = %user.id(),
            password_changed = cmd.password.is_some(),
            correlation_id = %metadata.correlation_id(),
            "user updated"
        );

        Ok(UserView::from(&user))
    }
}
