//! In-memory user repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, Repository, UserId};
use crate::domain::user::{Email, User};
use crate::ports::UserRepository;

use super::paging::page_of;

/// Users kept in insertion order behind an async lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &User, b: &User, field: &str) -> Ordering {
    match field {
        "username" => a.username().as_str().cmp(b.username().as_str()),
        "email" => a.email().as_str().cmp(b.email().as_str()),
        "created_at" => a.created_at().cmp(b.created_at()),
        _ => Ordering::Equal,
    }
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
}

#[async_trait]
impl Repository<User, UserId> for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.iter().find(|u| u.id() == id).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id() == user.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("User already exists: {}", user.id()),
            ));
        }
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(DomainError::new(ErrorCode::DuplicateEmail, "Email already registered")
                .with_detail("email", user.email().as_str()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(DomainError::new(ErrorCode::DuplicateEmail, "Email already registered")
                .with_detail("email", user.email().as_str()));
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| not_found(user.id()))?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id() == id)
            .ok_or_else(|| not_found(id))?;
        users.remove(index);
        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        let users = self.users.read().await.clone();
        Ok(page_of(users, request, compare))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::test_support::test_user;

    #[tokio::test]
    async fn save_then_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("john@example.com");
        repo.save(&user).await.unwrap();

        let email = Email::new("JOHN@example.com").unwrap();
        let found = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id(), user.id());
        assert!(repo.email_exists(&email).await.unwrap());
    }

    #[tokio::test]
    async fn save_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.save(&test_user("john@example.com")).await.unwrap();

        let err = repo.save(&test_user("john@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
    }

    #[tokio::test]
    async fn update_and_delete_missing_user_are_not_found() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("john@example.com");

        assert_eq!(repo.update(&user).await.unwrap_err().code, ErrorCode::UserNotFound);
        assert_eq!(repo.delete(user.id()).await.unwrap_err().code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn find_page_orders_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.save(&test_user("carol@example.com")).await.unwrap();
        repo.save(&test_user("alice@example.com")).await.unwrap();
        repo.save(&test_user("bob@example.com")).await.unwrap();

        let request = PageRequest::parse(None, Some(2), Some("email desc"), &["email"]).unwrap();
        let page = repo.find_page(&request).await.unwrap();

        let emails: Vec<_> = page.items.iter().map(|u| u.email().to_string()).collect();
        assert_eq!(emails, vec!["carol@example.com", "bob@example.com"]);
        assert_eq!(page.total_pages, 2);
    }
}
