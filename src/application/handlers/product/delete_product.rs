//! DeleteProductHandler - Command handler for removing a catalog entry.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ProductId};
use crate::domain::product::ProductError;
use crate::ports::ProductRepository;

use super::{ensure_catalog_manager, ProductView};

#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
}

pub struct DeleteProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl DeleteProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteProductCommand,
        metadata: CommandMetadata,
    ) -> Result<ProductView, ProductError> {
        ensure_catalog_manager(&metadata)?;

        let product = self
            .repository
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| ProductError::not_found(cmd.product_id))?;

        self.repository.delete(product.id()).await?;

        tracing::info!(
            product_id = %product.id(),
            correlation_id = %metadata.correlation_id(),
            "product deleted"
        );

        Ok(ProductView::from(&product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::domain::foundation::Repository;
    use crate::domain::product::test_support::test_product;

    #[tokio::test]
    async fn deletes_and_returns_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = test_product("Mug", "kitchen", 1200);
        repo.save(&product).await.unwrap();

        let view = DeleteProductHandler::new(repo.clone())
            .handle(DeleteProductCommand { product_id: *product.id() }, CommandMetadata::test_admin())
            .await
            .unwrap();

        assert_eq!(view.id, *product.id());
        assert!(!repo.exists(product.id()).await.unwrap());
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let id = ProductId::new();
        let result = DeleteProductHandler::new(Arc::new(InMemoryProductRepository::new()))
            .handle(DeleteProductCommand { product_id: id }, CommandMetadata::test_admin())
            .await;
        assert_eq!(result, Err(ProductError::NotFound(id)));
    }
}
