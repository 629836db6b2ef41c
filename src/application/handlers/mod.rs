//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod cart;
mod password;
pub mod product;
pub mod sale;
pub mod user;
