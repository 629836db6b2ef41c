//! GetUserHandler - Query handler for retrieving one user.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::UserRepository;

use super::UserView;

/// Query to get a user by ID.
#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

/// Handler for retrieving user details.
pub struct GetUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<UserView, UserError> {
        let user = self
            .repository
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(query.user_id))?;

        Ok(UserView::from(&user))
    }
}
