//! Catalog listing queries: all products, one category, category names.

use std::sync::Arc;

use crate::domain::foundation::{Page, PageRequest};
use crate::domain::product::ProductError;
use crate::ports::ProductRepository;

use super::ProductView;

#[derive(Debug, Clone, Default)]
pub struct ListProductsQuery {
    pub page: PageRequest,
}

pub struct ListProductsHandler {
    repository: Arc<dyn ProductRepository>,
}

impl ListProductsHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListProductsQuery,
    ) -> Result<Page<ProductView>, ProductError> {
        let page = self.repository.find_page(&query.page).await?;
        Ok(page.map(|product| ProductView::from(&product)))
    }
}

#[derive(Debug, Clone)]
pub struct ListProductsByCategoryQuery {
    pub category: String,
    pub page: PageRequest,
}

pub struct ListProductsByCategoryHandler {
    repository: Arc<dyn ProductRepository>,
}

impl ListProductsByCategoryHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// An unknown category yields an empty page, not an error.
    pub async fn handle(
        &self,
        query: ListProductsByCategoryQuery,
    ) -> Result<Page<ProductView>, ProductError> {
        let category = query.category.trim();
        if category.is_empty() {
            return Err(ProductError::validation("category", "Category is required"));
        }
        let page = self.repository.find_by_category(category, &query.page).await?;
        Ok(page.map(|product| ProductView::from(&product)))
    }
}

pub struct ListCategoriesHandler {
    repository: Arc<dyn ProductRepository>,
}

impl ListCategoriesHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<String>, ProductError> {
        Ok(self.repository.categories().await?)
    }
}
