//! Backoffice - E-commerce back-office API
//!
//! Manages users, the product catalog, shopping carts and sales. Sales
//! carry quantity-based discounts and publish domain events on every
//! state change.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
