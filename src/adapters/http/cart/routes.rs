//! HTTP routes for cart endpoints.

use axum::{routing::get, Router};

use super::handlers::{create_cart, delete_cart, get_cart, list_carts, update_cart, CartHandlers};

/// Creates the cart router, mounted at `/api/carts`.
pub fn cart_routes(handlers: CartHandlers) -> Router {
    Router::new()
        .route("/", get(list_carts).post(create_cart))
        .route("/:id", get(get_cart).put(update_cart).delete(delete_cart))
        .with_state(handlers)
}
