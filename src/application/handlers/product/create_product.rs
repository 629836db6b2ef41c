//! CreateProductHandler - Command handler for adding catalog entries.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ProductId};
use crate::domain::product::{Product, ProductError};
use crate::ports::ProductRepository;

use super::{ensure_catalog_manager, ProductInput, ProductView};

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub product: ProductInput,
}

pub struct CreateProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl CreateProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateProductCommand,
        metadata: CommandMetadata,
    ) -> Result<ProductView, ProductError> {
        // 1. Authorize
        ensure_catalog_manager(&metadata)?;

        // 2. Validate and build
        let product = Product::new(ProductId::new(), cmd.product.into_details()?)?;

        // 3. Persist
        self.repository.save(&product).await?;

        tracing::info!(
            product_id = %product.id(),
            category = %product.category(),
            correlation_id = %metadata.correlation_id(),
            "product created"
        );

        Ok(ProductView::from(&product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::application::handlers::product::product_input;
    use crate::domain::foundation::{AuthenticatedUser, Repository, UserId, UserRole};

    fn as_role(role: UserRole) -> CommandMetadata {
        CommandMetadata::for_user(AuthenticatedUser::new(UserId::new(), "u@example.com", role))
    }

    #[tokio::test]
    async fn manager_creates_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let handler = CreateProductHandler::new(repo.clone());

        let view = handler
            .handle(
                CreateProductCommand { product: product_input("  Mug ", "kitchen", 12.5) },
                as_role(UserRole::Manager),
            )
            .await
            .unwrap();

        assert_eq!(view.title, "Mug");
        assert_eq!(view.price.cents(), 1250);
        assert!(repo.exists(&view.id).await.unwrap());
    }

    #[tokio::test]
    async fn customer_is_forbidden() {
        let handler = CreateProductHandler::new(Arc::new(InMemoryProductRepository::new()));

        let result = handler
            .handle(
                CreateProductCommand { product: product_input("Mug", "kitchen", 12.5) },
                as_role(UserRole::Customer),
            )
            .await;

        assert_eq!(result, Err(ProductError::Forbidden));
    }

    #[tokio::test]
    async fn zero_price_is_rejected() {
        let handler = CreateProductHandler::new(Arc::new(InMemoryProductRepository::new()));

        let result = handler
            .handle(
                CreateProductCommand { product: product_input("Mug", "kitchen", 0.0) },
                CommandMetadata::test_admin(),
            )
            .await;

        assert!(matches!(result, Err(ProductError::ValidationFailed { ref field, .. }) if field == "price"));
    }
}
