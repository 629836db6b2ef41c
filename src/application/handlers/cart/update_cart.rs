//! UpdateCartHandler - Command handler for replacing a cart's contents.

use std::sync::Arc;

use crate::domain::cart::CartError;
use crate::domain::foundation::{CartId, CommandMetadata, Timestamp, UserId};
use crate::ports::{CartRepository, ProductRepository, UserRepository};

use super::view::to_items;
use super::{verify_references, CartLineInput, CartView};

#[derive(Debug, Clone)]
pub struct UpdateCartCommand {
    pub cart_id: CartId,
    pub user_id: UserId,
    /// Keeps the current date when absent.
    pub date: Option<Timestamp>,
    pub products: Vec<CartLineInput>,
}

pub struct UpdateCartHandler {
    carts: Arc<dyn CartRepository>,
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
}

impl UpdateCartHandler {
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
        cmd: UpdateCartCommand,
        metadata: CommandMetadata,
    ) -> Result<CartView, CartError> {
        // 1. Load
        let mut cart = self
            .carts
            .find_by_id(&cmd.cart_id)
            .await?
            .ok_or_else(|| CartError::not_found(cmd.cart_id))?;

        // 2. Validate lines and references
        let items = to_items(&cmd.products)?;
        verify_references(&*self.users, &*self.products, &cmd.user_id, &items).await?;

        // 3. Replace and persist
        let date = cmd.date.unwrap_or(*cart.date());
        cart.replace(cmd.user_id, date, items);
        self.carts.update(&cart).await?;

        tracing::info!(
            cart_id = %cart.id(),
            lines = cart.products().len(),
            correlation_id = %metadata.correlation_id(),
            "cart updated"
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
    use crate::application::handlers::cart::CartItemView;
    use crate::domain::cart::{Cart, CartItem};
    use crate::domain::foundation::Repository;
    use crate::domain::product::test_support::test_product;
    use crate::domain::user::test_support::test_user;

    #[tokio::test]
    async fn replaces_contents() {
        let carts = Arc::new(InMemoryCartRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let user = test_user("john@example.com");
        let mug = test_product("Mug", "kitchen", 1200);
        let pan = test_product("Pan", "kitchen", 3400);
        users.save(&user).await.unwrap();
        products.save(&mug).await.unwrap();
        products.save(&pan).await.unwrap();
        let cart = Cart::new(
            CartId::new(),
            *user.id(),
            Timestamp::now(),
            vec![CartItem::new(*mug.id(), 1).unwrap()],
        );
        carts.save(&cart).await.unwrap();

        let view = UpdateCartHandler::new(carts.clone(), users, products)
            .handle(
                UpdateCartCommand {
                    cart_id: *cart.id(),
                    user_id: *user.id(),
                    date: None,
                    products: vec![CartLineInput { product_id: *pan.id(), quantity: 3 }],
                },
                CommandMetadata::anonymous(),
            )
            .await
            .unwrap();

        assert_eq!(view.date, *cart.date());
        assert_eq!(view.products, vec![CartItemView { product_id: *pan.id(), quantity: 3 }]);
        let stored = carts.find_by_id(cart.id()).await.unwrap().unwrap();
        assert_eq!(stored.products()[0].quantity(), 3);
    }

    #[tokio::test]
    async fn missing_cart_is_not_found() {
        let id = CartId::new();
        let result = UpdateCartHandler::new(
            Arc::new(InMemoryCartRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
        )
        .handle(
            UpdateCartCommand { cart_id: id, user_id: UserId::new(), date: None, products: vec![] },
            CommandMetadata::anonymous(),
        )
        .await;
        assert_eq!(result, Err(CartError::NotFound(id)));
    }
}
