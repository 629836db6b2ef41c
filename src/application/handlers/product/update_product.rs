//! UpdateProductHandler - Command handler for replacing a catalog entry.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ProductId};
use crate::domain::product::ProductError;
use crate::ports::ProductRepository;

use super::{ensure_catalog_manager, ProductInput, ProductView};

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: ProductId,
    pub product: ProductInput,
}

pub struct UpdateProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl UpdateProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProductCommand,
        metadata: CommandMetadata,
    ) -> Result<ProductView, ProductError> {
        // 1. Authorize
        ensure_catalog_manager(&metadata)?;

        // 2. Load
        let mut product = self
            .repository
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| ProductError::not_found(cmd.product_id))?;

        // 3. Apply and persist
        product.update(cmd.product.into_details()?)?;
        self.repository.update(&product).await?;

        tracing::info!(
            product_id = %product.id(),
            correlation_id = %metadata.correlation_id(),
            "product updated"
        );

        Ok(ProductView::from(&product))
    }
}
