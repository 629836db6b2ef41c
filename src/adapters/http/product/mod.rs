//! HTTP adapter for product endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProductRequest, ProductResponse, RatingDto, RatingRequest};
pub use handlers::ProductHandlers;
pub use routes::product_routes;
