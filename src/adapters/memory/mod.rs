//! In-process repositories.
//!
//! Back the `memory` database backend used for local development and the
//! integration tests. Data lives only as long as the process.

mod cart_repository;
mod paging;
mod product_repository;
mod sale_repository;
mod user_repository;

pub use cart_repository::InMemoryCartRepository;
pub use product_repository::InMemoryProductRepository;
pub use sale_repository::InMemorySaleRepository;
pub use user_repository::InMemoryUserRepository;
