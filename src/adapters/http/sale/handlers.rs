//! HTTP handlers for sale endpoints.

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
use crate::application::handlers::sale::{
    CancelSaleCommand, CancelSaleHandler, CancelSaleItemCommand, CancelSaleItemHandler,
    CreateSaleCommand, CreateSaleHandler, DeleteSaleCommand, DeleteSaleHandler, GetSaleHandler,
    GetSaleQuery, ListSalesHandler, ListSalesQuery, UpdateSaleCommand, UpdateSaleHandler,
};
use crate::domain::foundation::{SaleId, SaleItemId};
use crate::domain::sale::SaleError;
use crate::ports::SALE_SORT_FIELDS;

use super::dto::{SaleRequest, SaleResponse};

#[derive(Clone)]
pub struct SaleHandlers {
    pub create: Arc<CreateSaleHandler>,
    pub get: Arc<GetSaleHandler>,
    pub list: Arc<ListSalesHandler>,
    pub update: Arc<UpdateSaleHandler>,
    pub cancel: Arc<CancelSaleHandler>,
    pub cancel_item: Arc<CancelSaleItemHandler>,
    pub delete: Arc<DeleteSaleHandler>,
}

/// POST /api/sales
pub async fn create_sale(
    State(handlers): State<SaleHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Json(req): Json<SaleRequest>,
) -> Response {
    let sale = match req.into_input() {
        Ok(sale) => sale,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };
    let cmd = CreateSaleCommand { sale };

    match handlers.create.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::created("Sale created successfully", SaleResponse::from(view)),
        Err(e) => handle_sale_error(e),
    }
}

/// GET /api/sales/:id
pub async fn get_sale(
    State(handlers): State<SaleHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let sale_id: SaleId = match parse_id(&id, "sale") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get.handle(GetSaleQuery { sale_id }).await {
        Ok(view) => ApiResponse::ok("Sale retrieved successfully", SaleResponse::from(view)),
        Err(e) => handle_sale_error(e),
    }
}

/// GET /api/sales
pub async fn list_sales(
    State(handlers): State<SaleHandlers>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Response {
    let page = match params.into_page_request(SALE_SORT_FIELDS) {
        Ok(page) => page,
        Err(response) => return response,
    };

    match handlers.list.handle(ListSalesQuery { page }).await {
        Ok(page) => PaginatedResponse::<SaleResponse>::from_page(page).ok(),
        Err(e) => handle_sale_error(e),
    }
}

/// PUT /api/sales/:id
pub async fn update_sale(
    State(handlers): State<SaleHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
    Json(req): Json<SaleRequest>,
) -> Response {
    let sale_id: SaleId = match parse_id(&id, "sale") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let sale = match req.into_input() {
        Ok(sale) => sale,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };
    let cmd = UpdateSaleCommand { sale_id, sale };
    match handlers.update.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::ok("Sale updated successfully", SaleResponse::from(view)),
        Err(e) => handle_sale_error(e),
    }
}

/// POST /api/sales/:id/cancel
pub async fn cancel_sale(
    State(handlers): State<SaleHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
) -> Response {
    let sale_id: SaleId = match parse_id(&id, "sale") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.cancel.handle(CancelSaleCommand { sale_id }, metadata).await {
        Ok(view) => ApiResponse::ok("Sale cancelled successfully", SaleResponse::from(view)),
        Err(e) => handle_sale_error(e),
    }
}

/// POST /api/sales/:id/items/:item_id/cancel
pub async fn cancel_sale_item(
    State(handlers): State<SaleHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path((id, item_id)): Path<(String, String)>,
) -> Response {
    let sale_id: SaleId = match parse_id(&id, "sale") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let item_id: SaleItemId = match parse_id(&item_id, "sale item") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CancelSaleItemCommand { sale_id, item_id };
    match handlers.cancel_item.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::ok("Sale item cancelled successfully", SaleResponse::from(view)),
        Err(e) => handle_sale_error(e),
    }
}

/// DELETE /api/sales/:id
pub async fn delete_sale(
    State(handlers): State<SaleHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
) -> Response {
    let sale_id: SaleId = match parse_id(&id, "sale") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete.handle(DeleteSaleCommand { sale_id }, metadata).await {
        Ok(view) => ApiResponse::ok("Sale deleted successfully", SaleResponse::from(view)),
        Err(e) => handle_sale_error(e),
    }
}

fn handle_sale_error(error: SaleError) -> Response {
    match error {
        SaleError::NotFound(id) => {
            ErrorResponse::not_found("Sale", &id.to_string()).respond(StatusCode::NOT_FOUND)
        }
        SaleError::ItemNotFound(id) => {
            ErrorResponse::not_found("Sale item", &id.to_string()).respond(StatusCode::NOT_FOUND)
        }
        SaleError::DuplicateSaleNumber(number) => {
            ErrorResponse::conflict(format!("Sale number already in use: {}", number))
                .respond(StatusCode::CONFLICT)
        }
        SaleError::AlreadyCancelled => ErrorResponse::invalid_state("Cannot modify a cancelled sale")
            .respond(StatusCode::UNPROCESSABLE_ENTITY),
        SaleError::InvalidState(msg) => {
            ErrorResponse::invalid_state(msg).respond(StatusCode::UNPROCESSABLE_ENTITY)
        }
        SaleError::ValidationFailed { field, message } => validation_failed(&field, message),
        SaleError::Infrastructure(msg) => internal_error(&msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_sale_maps_to_422() {
        let response = handle_sale_error(SaleError::AlreadyCancelled);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn duplicate_number_maps_to_409() {
        let response = handle_sale_error(SaleError::duplicate_sale_number("S-1"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_item_maps_to_404() {
        let response = handle_sale_error(SaleError::ItemNotFound(SaleItemId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
