//! ListUsersHandler - Query handler for paging through users.

use std::sync::Arc;

use crate::domain::foundation::{Page, PageRequest};
use crate::domain::user::UserError;
use crate::ports::UserRepository;

use super::UserView;

/// Query for one page of users.
#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery {
    pub page: PageRequest,
}

pub struct ListUsersHandler {
    repository: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Page<UserView>, UserError> {
        let page = self.repository.find_page(&query.page).await?;
        Ok(page.map(|user| UserView::from(&user)))
    }
}
