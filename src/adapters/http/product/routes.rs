//! HTTP routes for product endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_product, delete_product, get_product, list_by_category, list_categories,
    list_products, update_product, ProductHandlers,
};

/// Creates the product router, mounted at `/api/products`.
///
/// `/categories` and `/category/:category` take precedence over `/:id`.
pub fn product_routes(handlers: ProductHandlers) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/categories", get(list_categories))
        .route("/category/:category", get(list_by_category))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
        .with_state(handlers)
}
