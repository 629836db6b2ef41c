//! In-memory product repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageRequest, ProductId, Repository,
};
use crate::domain::product::Product;
use crate::ports::ProductRepository;

use super::paging::page_of;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Product, b: &Product, field: &str) -> Ordering {
    match field {
        "title" => a.title().cmp(b.title()),
        "price" => a.price().cmp(&b.price()),
        "category" => a.category().cmp(b.category()),
        "rating" => a
            .rating()
            .rate()
            .partial_cmp(&b.rating().rate())
            .unwrap_or(Ordering::Equal),
        "created_at" => a.created_at().cmp(b.created_at()),
        _ => Ordering::Equal,
    }
}

fn not_found(id: &ProductId) -> DomainError {
    DomainError::new(ErrorCode::ProductNotFound, format!("Product not found: {}", id))
}

#[async_trait]
impl Repository<Product, ProductId> for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().await.iter().find(|p| p.id() == id).cloned())
    }

    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id() == product.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Product already exists: {}", product.id()),
            ));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().await;
        let slot = products
            .iter_mut()
            .find(|p| p.id() == product.id())
            .ok_or_else(|| not_found(product.id()))?;
        *slot = product.clone();
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| not_found(id))?;
        products.remove(index);
        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, DomainError> {
        let products = self.products.read().await.clone();
        Ok(page_of(products, request, compare))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn categories(&self) -> Result<Vec<String>, DomainError> {
        let categories: BTreeSet<String> = self
            .products
            .read()
            .await
            .iter()
            .map(|p| p.category().to_string())
            .collect();
        Ok(categories.into_iter().collect())
    }

    async fn find_by_category(
        &self,
        category: &str,
        request: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let products: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.category() == category)
            .cloned()
            .collect();
        Ok(page_of(products, request, compare))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::test_support::test_product;
    use crate::ports::PRODUCT_SORT_FIELDS;

    async fn seeded() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        for product in [
            test_product("Jacket", "clothing", 5599),
            test_product("Ring", "jewelery", 16800),
            test_product("Shirt", "clothing", 2299),
        ] {
            repo.save(&product).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let repo = seeded().await;
        assert_eq!(repo.categories().await.unwrap(), vec!["clothing", "jewelery"]);
    }

    #[tokio::test]
    async fn find_by_category_filters_and_orders() {
        let repo = seeded().await;
        let request =
            PageRequest::parse(None, None, Some("price asc"), PRODUCT_SORT_FIELDS).unwrap();

        let page = repo.find_by_category("clothing", &request).await.unwrap();

        let titles: Vec<_> = page.items.iter().map(|p| p.title().to_string()).collect();
        assert_eq!(titles, vec!["Shirt", "Jacket"]);
        assert_eq!(page.total_items, 2);
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let repo = seeded().await;
        let page = repo.find_page(&PageRequest::first()).await.unwrap();
        let id = *page.items[0].id();

        repo.delete(&id).await.unwrap();

        assert!(!repo.exists(&id).await.unwrap());
        assert_eq!(repo.delete(&id).await.unwrap_err().code, ErrorCode::ProductNotFound);
    }
}
