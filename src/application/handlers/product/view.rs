//! Read model and input shape for product handlers.

use serde::Serialize;

use crate::domain::foundation::{Money, ProductId, Timestamp};
use crate::domain::product::{Product, ProductDetails, ProductError, Rating};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingView {
    pub rate: f64,
    pub count: u32,
}

impl From<Rating> for RatingView {
    fn from(rating: Rating) -> Self {
        Self {
            rate: rating.rate(),
            count: rating.count(),
        }
    }
}

/// Product as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: RatingView,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: *product.id(),
            title: product.title().to_string(),
            price: product.price(),
            description: product.description().to_string(),
            category: product.category().to_string(),
            image: product.image().to_string(),
            rating: product.rating().into(),
            created_at: *product.created_at(),
            updated_at: *product.updated_at(),
        }
    }
}

/// Raw catalog fields shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub title: String,
    /// Decimal currency units, e.g. `109.95`.
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rate: f64,
    pub count: u32,
}

impl ProductInput {
    pub fn into_details(self) -> Result<ProductDetails, ProductError> {
        let price = Money::from_decimal(self.price)
            .map_err(|e| ProductError::validation("price", e.to_string()))?;
        let rating = Rating::new(self.rate, self.count)?;

        Ok(ProductDetails {
            title: self.title,
            price,
            description: self.description,
            category: self.category,
            image: self.image,
            rating,
        }
        .validated()?)
    }
}

#[cfg(test)]
pub(crate) fn product_input(title: &str, category: &str, price: f64) -> ProductInput {
    ProductInput {
        title: title.to_string(),
        price,
        description: "A fine product".to_string(),
        category: category.to_string(),
        image: "https://img.example.com/p.png".to_string(),
        rate: 4.1,
        count: 120,
    }
}
