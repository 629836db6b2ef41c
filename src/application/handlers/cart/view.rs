//! Read model and input shapes for cart handlers.

use serde::Serialize;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::foundation::{CartId, ProductId, Timestamp, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub id: CartId,
    pub user_id: UserId,
    pub date: Timestamp,
    pub products: Vec<CartItemView>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            id: *cart.id(),
            user_id: *cart.user_id(),
            date: *cart.date(),
            products: cart
                .products()
                .iter()
                .map(|item| CartItemView {
                    product_id: *item.product_id(),
                    quantity: item.quantity(),
                })
                .collect(),
            created_at: *cart.created_at(),
            updated_at: *cart.updated_at(),
        }
    }
}

/// One requested cart line, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineInput {
    pub product_id: ProductId,
    pub quantity: u32,
}

pub(super) fn to_items(lines: &[CartLineInput]) -> Result<Vec<CartItem>, ValidationError> {
    lines
        .iter()
        .map(|line| CartItem::new(line.product_id, line.quantity))
        .collect()
}
