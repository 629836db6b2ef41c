//! GetCartHandler - Query handler for one cart.

use std::sync::Arc;

use crate::domain::cart::CartError;
use crate::domain::foundation::CartId;
use crate::ports::CartRepository;

use super::CartView;

#[derive(Debug, Clone)]
pub struct GetCartQuery {
    pub cart_id: CartId,
}

pub struct GetCartHandler {
    repository: Arc<dyn CartRepository>,
}

impl GetCartHandler {
    pub fn new(repository: Arc<dyn CartRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetCartQuery) -> Result<CartView, CartError> {
        let cart = self
            .repository
            .find_by_id(&query.cart_id)
            .await?
            .ok_or_else(|| CartError::not_found(query.cart_id))?;

        Ok(CartView::from(&cart))
    }
}
