//! DeleteCartHandler - Command handler for removing a cart.

use std::sync::Arc;

use crate::domain::cart::CartError;
use crate::domain::foundation::{CartId, CommandMetadata};
use crate::ports::CartRepository;

use super::CartView;

#[derive(Debug, Clone)]
pub struct DeleteCartCommand {
    pub cart_id: CartId,
}

pub struct DeleteCartHandler {
    repository: Arc<dyn CartRepository>,
}

impl DeleteCartHandler {
    pub fn new(repository: Arc<dyn CartRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCartCommand,
        metadata: CommandMetadata,
    ) -> Result<CartView, CartError> {
        let cart = self
            .repository
            .find_by_id(&cmd.cart_id)
            .await?
            .ok_or_else(|| CartError::not_found(cmd.cart_id))?;

        self.repository.delete(cart.id()).await?;

        tracing::info!(
            cart_id = %cart.id(),
            correlation_id = %metadata.correlation_id(),
            "cart deleted"
        );

        Ok(CartView::from(&cart))
    }
}
