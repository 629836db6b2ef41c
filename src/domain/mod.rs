//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `user` - Back-office accounts
//! - `product` - Catalog
//! - `cart` - Shopping carts
//! - `sale` - Sales, discount policy and sale events

pub mod cart;
pub mod foundation;
pub mod product;
pub mod sale;
pub mod user;
