//! HTTP handlers for product endpoints.

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
use crate::application::handlers::product::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    GetProductHandler, GetProductQuery, ListCategoriesHandler, ListProductsByCategoryHandler,
    ListProductsByCategoryQuery, ListProductsHandler, ListProductsQuery, UpdateProductCommand,
    UpdateProductHandler,
};
use crate::domain::foundation::ProductId;
use crate::domain::product::ProductError;
use crate::ports::PRODUCT_SORT_FIELDS;

use super::dto::{ProductRequest, ProductResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProductHandlers {
    pub create: Arc<CreateProductHandler>,
    pub get: Arc<GetProductHandler>,
    pub list: Arc<ListProductsHandler>,
    pub list_by_category: Arc<ListProductsByCategoryHandler>,
    pub categories: Arc<ListCategoriesHandler>,
    pub update: Arc<UpdateProductHandler>,
    pub delete: Arc<DeleteProductHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/products
pub async fn create_product(
    State(handlers): State<ProductHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Json(req): Json<ProductRequest>,
) -> Response {
    let product = match req.into_input() {
        Ok(product) => product,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };
    let cmd = CreateProductCommand { product };

    match handlers.create.handle(cmd, metadata).await {
        Ok(view) => {
            ApiResponse::created("Product created successfully", ProductResponse::from(view))
        }
        Err(e) => handle_product_error(e),
    }
}

/// GET /api/products/:id
pub async fn get_product(
    State(handlers): State<ProductHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let product_id: ProductId = match parse_id(&id, "product") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get.handle(GetProductQuery { product_id }).await {
        Ok(view) => ApiResponse::ok("Product retrieved successfully", ProductResponse::from(view)),
        Err(e) => handle_product_error(e),
    }
}

/// GET /api/products
pub async fn list_products(
    State(handlers): State<ProductHandlers>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Response {
    let page = match params.into_page_request(PRODUCT_SORT_FIELDS) {
        Ok(page) => page,
        Err(response) => return response,
    };

    match handlers.list.handle(ListProductsQuery { page }).await {
        Ok(page) => PaginatedResponse::<ProductResponse>::from_page(page).ok(),
        Err(e) => handle_product_error(e),
    }
}

/// GET /api/products/categories
pub async fn list_categories(
    State(handlers): State<ProductHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match handlers.categories.handle().await {
        Ok(categories) => ApiResponse::ok("Categories retrieved successfully", categories),
        Err(e) => handle_product_error(e),
    }
}

/// GET /api/products/category/:category
pub async fn list_by_category(
    State(handlers): State<ProductHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(category): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = match params.into_page_request(PRODUCT_SORT_FIELDS) {
        Ok(page) => page,
        Err(response) => return response,
    };

    let query = ListProductsByCategoryQuery { category, page };
    match handlers.list_by_category.handle(query).await {
        Ok(page) => PaginatedResponse::<ProductResponse>::from_page(page).ok(),
        Err(e) => handle_product_error(e),
    }
}

/// PUT /api/products/:id
pub async fn update_product(
    State(handlers): State<ProductHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> Response {
    let product_id: ProductId = match parse_id(&id, "product") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let product = match req.into_input() {
        Ok(product) => product,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };
    let cmd = UpdateProductCommand { product_id, product };
    match handlers.update.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::ok("Product updated successfully", ProductResponse::from(view)),
        Err(e) => handle_product_error(e),
    }
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(handlers): State<ProductHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
) -> Response {
    let product_id: ProductId = match parse_id(&id, "product") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete.handle(DeleteProductCommand { product_id }, metadata).await {
        Ok(view) => ApiResponse::ok("Product deleted successfully", ProductResponse::from(view)),
        Err(e) => handle_product_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_product_error(error: ProductError) -> Response {
    match error {
        ProductError::NotFound(id) => {
            ErrorResponse::not_found("Product", &id.to_string()).respond(StatusCode::NOT_FOUND)
        }
        ProductError::Forbidden => ErrorResponse::forbidden("Only managers can change the catalog")
            .respond(StatusCode::FORBIDDEN),
        ProductError::ValidationFailed { field, message } => validation_failed(&field, message),
        ProductError::Infrastructure(msg) => internal_error(&msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_product_error(ProductError::NotFound(ProductId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = handle_product_error(ProductError::validation("price", "must be positive"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
