//! HTTP adapter for user endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AddressDto, GeolocationDto, NameDto, UserRequest, UserResponse};
pub use handlers::UserHandlers;
pub use routes::user_routes;
