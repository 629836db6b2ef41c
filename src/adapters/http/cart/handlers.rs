//! HTTP handlers for cart endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::adapters::http::middleware::{RequestMetadata, RequireAuth};
use crate::adapters::http::response::{
    internal_error, parse_id, validation_failed, ApiResponse, ErrorResponse, ListParams,
    PaginatedResponse,
};
use crate::application::handlers::cart::{
    CreateCartHandler, DeleteCartCommand, DeleteCartHandler, GetCartHandler, GetCartQuery,
    ListCartsHandler, ListCartsQuery, UpdateCartHandler,
};
use crate::domain::cart::CartError;
use crate::domain::foundation::CartId;
use crate::ports::CART_SORT_FIELDS;

use super::dto::{CartRequest, CartResponse};

#[derive(Clone)]
pub struct CartHandlers {
    pub create: Arc<CreateCartHandler>,
    pub get: Arc<GetCartHandler>,
    pub list: Arc<ListCartsHandler>,
    pub update: Arc<UpdateCartHandler>,
    pub delete: Arc<DeleteCartHandler>,
}

/// POST /api/carts
pub async fn create_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Json(req): Json<CartRequest>,
) -> Response {
    let cmd = match req.into_create_command() {
        Ok(cmd) => cmd,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };

    match handlers.create.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::created("Cart created successfully", CartResponse::from(view)),
        Err(e) => handle_cart_error(e),
    }
}

/// GET /api/carts/:id
pub async fn get_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let cart_id: CartId = match parse_id(&id, "cart") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get.handle(GetCartQuery { cart_id }).await {
        Ok(view) => ApiResponse::ok("Cart retrieved successfully", CartResponse::from(view)),
        Err(e) => handle_cart_error(e),
    }
}

/// GET /api/carts
pub async fn list_carts(
    State(handlers): State<CartHandlers>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Response {
    let page = match params.into_page_request(CART_SORT_FIELDS) {
        Ok(page) => page,
        Err(response) => return response,
    };

    match handlers.list.handle(ListCartsQuery { page }).await {
        Ok(page) => PaginatedResponse::<CartResponse>::from_page(page).ok(),
        Err(e) => handle_cart_error(e),
    }
}

/// PUT /api/carts/:id
pub async fn update_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
    Json(req): Json<CartRequest>,
) -> Response {
    let cart_id: CartId = match parse_id(&id, "cart") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let cmd = match req.into_update_command(cart_id) {
        Ok(cmd) => cmd,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };

    match handlers.update.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::ok("Cart updated successfully", CartResponse::from(view)),
        Err(e) => handle_cart_error(e),
    }
}

/// DELETE /api/carts/:id
pub async fn delete_cart(
    State(handlers): State<CartHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
) -> Response {
    let cart_id: CartId = match parse_id(&id, "cart") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete.handle(DeleteCartCommand { cart_id }, metadata).await {
        Ok(view) => ApiResponse::ok("Cart deleted successfully", CartResponse::from(view)),
        Err(e) => handle_cart_error(e),
    }
}

fn handle_cart_error(error: CartError) -> Response {
    match error {
        CartError::NotFound(id) => {
            ErrorResponse::not_found("Cart", &id.to_string()).respond(StatusCode::NOT_FOUND)
        }
        CartError::UserNotFound(id) => {
            ErrorResponse::not_found("User", &id.to_string()).respond(StatusCode::NOT_FOUND)
        }
        CartError::ProductNotFound(id) => {
            ErrorResponse::not_found("Product", &id.to_string()).respond(StatusCode::NOT_FOUND)
        }
        CartError::ValidationFailed { field, message } => validation_failed(&field, message),
        CartError::Infrastructure(msg) => internal_error(&msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProductId;

    #[test]
    fn missing_product_maps_to_404() {
        let response = handle_cart_error(CartError::ProductNotFound(ProductId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
