//! Cart domain module.

mod aggregate;
mod errors;

pub use aggregate::{merge_lines, Cart, CartItem};
pub use errors::CartError;
