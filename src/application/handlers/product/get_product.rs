//! GetProductHandler - Query handler for one product.

use std::sync::Arc;

use crate::domain::foundation::ProductId;
use crate::domain::product::ProductError;
use crate::ports::ProductRepository;

use super::ProductView;

#[derive(Debug, Clone)]
pub struct GetProductQuery {
    pub product_id: ProductId,
}

pub struct GetProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl GetProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProductQuery) -> Result<ProductView, ProductError> {
        let product = self
            .repository
            .find_by_id(&query.product_id)
            .await?
            .ok_or_else(|| ProductError::not_found(query.product_id))?;

        Ok(ProductView::from(&product))
    }
}
