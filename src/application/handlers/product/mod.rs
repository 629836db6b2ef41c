//! Product command and query handlers.
//!
//! Reads are public. Writes need a `Manager` or `Admin` actor.

mod create_product;
mod delete_product;
mod get_product;
mod list_products;
mod update_product;
mod view;

pub use create_product::{CreateProductCommand, CreateProductHandler};
pub use delete_product::{DeleteProductCommand, DeleteProductHandler};
pub use get_product::{GetProductHandler, GetProductQuery};
pub use list_products::{
    ListCategoriesHandler, ListProductsByCategoryHandler, ListProductsByCategoryQuery,
    ListProductsHandler, ListProductsQuery,
};
pub use update_product::{UpdateProductCommand, UpdateProductHandler};
pub use view::{ProductInput, ProductView, RatingView};

#[cfg(test)]
pub(crate) use view::product_input;

use crate::domain::foundation::CommandMetadata;
use crate::domain::product::ProductError;

fn ensure_catalog_manager(metadata: &CommandMetadata) -> Result<(), ProductError> {
    match metadata.actor() {
        Some(actor) if actor.role.can_manage_catalog() => Ok(()),
        _ => Err(ProductError::forbidden()),
    }
}
