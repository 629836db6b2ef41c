//! Cart command and query handlers.

mod create_cart;
mod delete_cart;
mod get_cart;
mod list_carts;
mod update_cart;
mod view;

pub use create_cart::{CreateCartCommand, CreateCartHandler};
pub use delete_cart::{DeleteCartCommand, DeleteCartHandler};
pub use get_cart::{GetCartHandler, GetCartQuery};
pub use list_carts::{ListCartsHandler, ListCartsQuery};
pub use update_cart::{UpdateCartCommand, UpdateCartHandler};
pub use view::{CartItemView, CartLineInput, CartView};

use crate::domain::cart::{CartError, CartItem};
use crate::domain::foundation::UserId;
use crate::ports::{ProductRepository, UserRepository};

/// Checks that the owner and every product in the cart exist.
async fn verify_references(
    users: &dyn UserRepository,
    products: &dyn ProductRepository,
    user_id: &UserId,
    items: &[CartItem],
) -> Result<(), CartError> {
    if !users.exists(user_id).await? {
        return Err(CartError::user_not_found(*user_id));
    }
    for item in items {
        if !products.exists(item.product_id()).await? {
            return Err(CartError::product_not_found(*item.product_id()));
        }
    }
    Ok(())
}
