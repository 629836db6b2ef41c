//! Product repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageRequest, ProductId, Repository};
use crate::domain::product::Product;

/// Fields products may be ordered by. `rating` sorts by rating rate.
pub const PRODUCT_SORT_FIELDS: &[&str] = &["title", "price", "category", "rating", "created_at"];

/// Repository port for Product aggregate persistence.
#[async_trait]
pub trait ProductRepository: Repository<Product, ProductId> {
    /// Distinct category names in ascending order.
    async fn categories(&self) -> Result<Vec<String>, DomainError>;

    /// One page of the products in exactly this category.
    async fn find_by_category(
        &self,
        category: &str,
        request: &PageRequest,
    ) -> Result<Page<Product>, DomainError>;
}
