//! Product domain module.
//!
//! The catalog: products with a price, a category and a rating summary.

mod aggregate;
mod errors;

pub use aggregate::{
    Product, ProductDetails, Rating, MAX_CATEGORY_LENGTH, MAX_RATING, MAX_TITLE_LENGTH,
};
pub use errors::ProductError;

#[cfg(test)]
pub(crate) use aggregate::test_support;
