//! Cart repository port.

use async_trait::async_trait;

use crate::domain::cart::Cart;
use crate::domain::foundation::{CartId, Repository};

/// Fields carts may be ordered by.
pub const CART_SORT_FIELDS: &[&str] = &["date", "user_id", "created_at"];

/// Repository port for Cart aggregate persistence.
///
/// Carts are saved together with their lines; `update` replaces all lines.
#[async_trait]
pub trait CartRepository: Repository<Cart, CartId> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CartRepository) {}
    }
}
