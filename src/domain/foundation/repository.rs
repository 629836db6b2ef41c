//! Base repository trait for persistence operations.
//!
//! Each aggregate repository port extends `Repository<T, ID>` and only adds
//! its domain-specific queries.
//!
//! ```ignore
//! #[async_trait]
//! pub trait UserRepository: Repository<User, UserId> {
//!     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
//! }
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use super::{DomainError, Page, PageRequest};

/// Base trait for aggregate repositories.
///
/// All methods return `Result<_, DomainError>`; implementations convert
/// adapter-specific errors (e.g., database errors) into `DomainError`.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Finds an aggregate by its unique identifier.
    ///
    /// Returns `Ok(None)` if the aggregate doesn't exist.
    /// Returns `Err` only for infrastructure failures.
    async fn find_by_id(&self, id: &ID) -> Result<Option<T>, DomainError>;

    /// Persists a new aggregate.
    async fn save(&self, entity: &T) -> Result<(), DomainError>;

    /// Updates an existing aggregate.
    ///
    /// # Errors
    ///
    /// Returns the aggregate's not-found error if it doesn't exist.
    async fn update(&self, entity: &T) -> Result<(), DomainError>;

    /// Deletes an aggregate by its identifier.
    ///
    /// # Errors
    ///
    /// Returns the aggregate's not-found error if it doesn't exist.
    async fn delete(&self, id: &ID) -> Result<(), DomainError>;

    /// Returns one page of aggregates in the requested order.
    async fn find_page(&self, request: &PageRequest) -> Result<Page<T>, DomainError>;

    /// Checks if an aggregate with the given ID exists.
    ///
    /// Default implementation uses `find_by_id`.
    async fn exists(&self, id: &ID) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
