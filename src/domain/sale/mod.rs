//! Sale domain module.
//!
//! Sales with quantity-based discounts and cancellation.
//!
//! # Events
//!
//! - `SaleCreated` - Published when a sale is recorded
//! - `SaleModified` - Published when a sale is replaced
//! - `SaleCancelled` - Published when a sale is cancelled
//! - `ItemCancelled` - Published when one item is cancelled

mod aggregate;
pub mod discount;
mod errors;
mod events;

pub use aggregate::{PartyRef, Sale, SaleHeader, SaleItem, SaleLine, MAX_SALE_NUMBER_LENGTH};
pub use discount::{discount_percent, price_item, ItemPricing, MAX_IDENTICAL_ITEMS};
pub use errors::SaleError;
pub use events::{ItemCancelled, SaleCancelled, SaleCreated, SaleModified};

#[cfg(test)]
pub(crate) use aggregate::test_support;
