//! HTTP routes for sale endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_sale, cancel_sale_item, create_sale, delete_sale, get_sale, list_sales, update_sale,
    SaleHandlers,
};

/// Creates the sale router, mounted at `/api/sales`.
pub fn sale_routes(handlers: SaleHandlers) -> Router {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale).put(update_sale).delete(delete_sale))
        .route("/:id/cancel", post(cancel_sale))
        .route("/:id/items/:item_id/cancel", post(cancel_sale_item))
        .with_state(handlers)
}
