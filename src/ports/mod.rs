//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `UserRepository`, `ProductRepository`, `CartRepository`,
//!   `SaleRepository` - one per aggregate, each extending `Repository`
//!
//! ## Security Ports
//!
//! - `PasswordHasher` - Password key derivation
//! - `TokenIssuer` - Access token signing
//! - `SessionValidator` - Access token validation
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events

mod cart_repository;
mod event_publisher;
mod password_hasher;
mod product_repository;
mod sale_repository;
mod session_validator;
mod token_issuer;
mod user_repository;

pub use cart_repository::{CartRepository, CART_SORT_FIELDS};
pub use event_publisher::EventPublisher;
pub use password_hasher::PasswordHasher;
pub use product_repository::{ProductRepository, PRODUCT_SORT_FIELDS};
pub use sale_repository::{SaleRepository, SALE_SORT_FIELDS};
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
pub use user_repository::{UserRepository, USER_SORT_FIELDS};
