//! CreateCartHandler - Command handler for opening a cart.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError};
use crate::domain::foundation::{CartId, CommandMetadata, Timestamp, UserId};
use crate::ports::{CartRepository, ProductRepository, UserRepository};

use super::view::to_items;
use super::{verify_references, CartLineInput, CartView};

#[derive(Debug, Clone)]
pub struct CreateCartCommand {
    pub user_id: UserId,
    /// Defaults to now.
    pub date: Option<Timestamp>,
    pub products: Vec<CartLineInput>,
}

pub struct CreateCartHandler {
    carts: Arc<dyn CartRepository>,
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CreateCartHandler {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            carts,
            users,
            products,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCartCommand,
        metadata: CommandMetadata,
    ) -> Result<CartView, CartError> {
        // 1. Validate lines
        let items = to_items(&cmd.products)?;

        // 2. Referenced user and products must exist
        verify_references(&*self.users, &*self.products, &cmd.user_id, &items).await?;

        // 3. Build and persist
        let cart = Cart::new(
            CartId::new(),
            cmd.user_id,
            cmd.date.unwrap_or_else(Timestamp::now),
            items,
        );
        self.carts.save(&cart).await?;

        tracing::info!(
            cart_id = %cart.id(),
            user_id = %cart.user_id(),
            lines = cart.products().len(),
            correlation_id = %metadata.correlation_id(),
            "cart created"
        );

        Ok(CartView::from(&cart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCartRepository, InMemoryProductRepository, InMemoryUserRepository,
    };
    use crate::domain::foundation::{ProductId, Repository};
    use crate::domain::product::test_support::test_product;
    use crate::domain::user::test_support::test_user;

    struct Fixture {
        carts: Arc<InMemoryCartRepository>,
        handler: CreateCartHandler,
        user_id: UserId,
        product_id: ProductId,
    }

    async fn fixture() -> Fixture {
        let carts = Arc::new(InMemoryCartRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let user = test_user("john@example.com");
        let product = test_product("Mug", "kitchen", 1200);
        users.save(&user).await.unwrap();
        products.save(&product).await.unwrap();
        Fixture {
            handler: CreateCartHandler::new(carts.clone(), users, products),
            carts,
            user_id: *user.id(),
            product_id: *product.id(),
        }
    }

    #[tokio::test]
    async fn creates_cart_and_merges_duplicate_lines() {
        let f = fixture().await;
        let line = CartLineInput { product_id: f.product_id, quantity: 2 };

        let view = f
            .handler
            .handle(
                CreateCartCommand { user_id: f.user_id, date: None, products: vec![line, line] },
                CommandMetadata::anonymous(),
            )
            .await
            .unwrap();

        assert_eq!(view.products.len(), 1);
        assert_eq!(view.products[0].quantity, 4);
        assert!(f.carts.exists(&view.id).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let f = fixture().await;
        let ghost = UserId::new();

        let result = f
            .handler
            .handle(
                CreateCartCommand { user_id: ghost, date: None, products: vec![] },
                CommandMetadata::anonymous(),
            )
            .await;

        assert_eq!(result, Err(CartError::UserNotFound(ghost)));
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let f = fixture().await;
        let ghost = ProductId::new();

        let result = f
            .handler
            .handle(
                CreateCartCommand {
                    user_id: f.user_id,
                    date: None,
                    products: vec![CartLineInput { product_id: ghost, quantity: 1 }],
                },
                CommandMetadata::anonymous(),
            )
            .await;

        assert_eq!(result, Err(CartError::ProductNotFound(ghost)));
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(
                CreateCartCommand {
                    user_id: f.user_id,
                    date: None,
                    products: vec![CartLineInput { product_id: f.product_id, quantity: 0 }],
                },
                CommandMetadata::anonymous(),
            )
            .await;

        assert!(matches!(result, Err(CartError::ValidationFailed { .. })));
    }
}
