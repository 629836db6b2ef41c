//! Product aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Money, ProductId, Timestamp, ValidationError};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_CATEGORY_LENGTH: usize = 50;
pub const MAX_RATING: f64 = 5.0;

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    rate: f64,
    count: u32,
}

impl Rating {
    /// # Errors
    ///
    /// - `OutOfRange` if `rate` is outside `0.0..=5.0` or not finite
    pub fn new(rate: f64, count: u32) -> Result<Self, ValidationError> {
        if !rate.is_finite() || !(0.0..=MAX_RATING).contains(&rate) {
            return Err(ValidationError::invalid_format(
                "rating.rate",
                format!("must be between 0 and {}", MAX_RATING),
            ));
        }
        Ok(Self { rate, count })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self { rate: 0.0, count: 0 }
    }
}

/// Catalog fields of a product, validated as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub title: String,
    pub price: Money,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

impl ProductDetails {
    /// Trims text fields and checks the catalog rules.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for an empty or oversized title or category
    /// - `ValidationFailed` for a zero price
    pub fn validated(mut self) -> Result<Self, DomainError> {
        self.title = self.title.trim().to_string();
        self.category = self.category.trim().to_string();

        check_length("title", &self.title, MAX_TITLE_LENGTH)?;
        check_length("category", &self.category, MAX_CATEGORY_LENGTH)?;

        if self.price.is_zero() {
            return Err(DomainError::validation("price", "Price must be greater than zero"));
        }

        Ok(self)
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field).into());
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::out_of_range(field, 1, max as i64, len as i64).into());
    }
    Ok(())
}

/// A catalog entry.
///
/// # Invariants
///
/// - `title` is 1-100 characters, `category` 1-50 characters
/// - `price` is strictly positive
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    details: ProductDetails,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Product {
    /// Create a new product.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any catalog rule is broken
    pub fn new(id: ProductId, details: ProductDetails) -> Result<Self, DomainError> {
        let details = details.validated()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            details,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a product from persistence (no validation).
    pub fn reconstitute(
        id: ProductId,
        details: ProductDetails,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            details,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn price(&self) -> Money {
        self.details.price
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn category(&self) -> &str {
        &self.details.category
    }

    pub fn image(&self) -> &str {
        &self.details.image
    }

    pub fn rating(&self) -> Rating {
        self.details.rating
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replace all catalog fields.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any catalog rule is broken; the product is
    ///   left unchanged
    pub fn update(&mut self, details: ProductDetails) -> Result<(), DomainError> {
        self.details = details.validated()?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
