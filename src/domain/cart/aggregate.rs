//! Cart aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CartId, ProductId, Timestamp, UserId, ValidationError};

/// One product line in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    product_id: ProductId,
    quantity: u32,
}

impl CartItem {
    /// # Errors
    ///
    /// - `OutOfRange` if quantity is zero
    pub fn new(product_id: ProductId, quantity: u32) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::out_of_range(
                "products.quantity",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Collapses lines for the same product into one, summing quantities.
///
/// Order of first appearance is kept.
pub fn merge_lines(items: impl IntoIterator<Item = CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::new();
    for item in items {
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item),
        }
    }
    merged
}

/// A user's shopping cart.
///
/// # Invariants
///
/// - Each product appears at most once
/// - Every quantity is at least 1
///
/// Existence of the referenced user and products is checked by the
/// application handlers, which own the repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    user_id: UserId,
    date: Timestamp,
    products: Vec<CartItem>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Cart {
    /// Create a new cart, merging duplicate product lines.
    pub fn new(
        id: CartId,
        user_id: UserId,
        date: Timestamp,
        products: Vec<CartItem>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            date,
            products: merge_lines(products),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a cart from persistence (no validation).
    pub fn reconstitute(
        id: CartId,
        user_id: UserId,
        date: Timestamp,
        products: Vec<CartItem>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            products,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &CartId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> &Timestamp {
        &self.date
    }

    pub fn products(&self) -> &[CartItem] {
        &self.products
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replace owner, date and contents.
    pub fn replace(&mut self, user_id: UserId, date: Timestamp, products: Vec<CartItem>) {
        self.user_id = user_id;
        self.date = date;
        self.products = merge_lines(products);
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_item_rejects_zero_quantity() {
        assert!(CartItem::new(ProductId::new(), 0).is_err());
        assert!(CartItem::new(ProductId::new(), 1).is_ok());
    }

    #[test]
    fn merge_lines_sums_duplicates_in_first_seen_order() {
        let a = ProductId::new();
        let b = ProductId::new();
        let merged = merge_lines(vec![
            CartItem::new(a, 2).unwrap(),
            CartItem::new(b, 1).unwrap(),
            CartItem::new(a, 3).unwrap(),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].product_id(), &a);
        assert_eq!(merged[0].quantity(), 5);
        assert_eq!(merged[1].quantity(), 1);
    }

    #[test]
    fn new_cart_merges_lines() {
        let p = ProductId::new();
        let cart = Cart::new(
            CartId::new(),
            UserId::new(),
            Timestamp::now(),
            vec![CartItem::new(p, 1).unwrap(), CartItem::new(p, 1).unwrap()],
        );

        assert_eq!(cart.products().len(), 1);
        assert_eq!(cart.products()[0].quantity(), 2);
    }

    #[test]
    fn replace_updates_owner_and_contents() {
        let mut cart = Cart::new(CartId::new(), UserId::new(), Timestamp::now(), vec![]);
        let new_owner = UserId::new();
        cart.replace(new_owner, Timestamp::now(), vec![CartItem::new(ProductId::new(), 4).unwrap()]);

        assert_eq!(cart.user_id(), &new_owner);
        assert_eq!(cart.products()[0].quantity(), 4);
    }
}
