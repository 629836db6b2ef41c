//! HTTP adapter for cart endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CartLineDto, CartLineRequest, CartRequest, CartResponse};
pub use handlers::CartHandlers;
pub use routes::cart_routes;
