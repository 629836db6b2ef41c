//! HTTP DTOs for product endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::response::body_count;
use crate::application::handlers::product::{ProductInput, ProductView};
use crate::domain::foundation::{Money, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingDto {
    pub rate: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RatingRequest {
    pub rate: f64,
    pub count: i64,
}

/// Body of `POST /api/products` and `PUT /api/products/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: RatingRequest,
}

impl ProductRequest {
    pub fn into_input(self) -> Result<ProductInput, ValidationError> {
        Ok(ProductInput {
            count: body_count(self.rating.count, "rating.count")?,
            rate: self.rating.rate,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub price: Money,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: RatingDto,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        Self {
            id: view.id.to_string(),
            title: view.title,
            price: view.price,
            description: view.description,
            category: view.category,
            image: view.image,
            rating: RatingDto {
                rate: view.rating.rate,
                count: view.rating.count,
            },
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}
