//! HTTP adapter for sale endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{SaleItemRequest, SaleItemResponse, SaleRequest, SaleResponse};
pub use handlers::SaleHandlers;
pub use routes::sale_routes;
