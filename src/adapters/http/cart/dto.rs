//! HTTP DTOs for cart endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::response::{body_count, body_id};
use crate::application::handlers::cart::{
    CartLineInput, CartView, CreateCartCommand, UpdateCartCommand,
};
use crate::domain::foundation::{CartId, Timestamp, UserId, ValidationError};

#[derive(Debug, Clone, Serialize)]
pub struct CartLineDto {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartLineRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Body of `POST /api/carts` and `PUT /api/carts/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartRequest {
    pub user_id: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub products: Vec<CartLineRequest>,
}

impl CartRequest {
    fn parts(self) -> Result<(UserId, Option<Timestamp>, Vec<CartLineInput>), ValidationError> {
        let user_id = body_id(&self.user_id, "user_id")?;
        let products = self
            .products
            .into_iter()
            .map(|line| {
                Ok(CartLineInput {
                    product_id: body_id(&line.product_id, "products.product_id")?,
                    quantity: body_count(line.quantity, "products.quantity")?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        Ok((user_id, self.date.map(Timestamp::from_datetime), products))
    }

    pub fn into_create_command(self) -> Result<CreateCartCommand, ValidationError> {
        let (user_id, date, products) = self.parts()?;
        Ok(CreateCartCommand {
            user_id,
            date,
            products,
        })
    }

    pub fn into_update_command(self, cart_id: CartId) -> Result<UpdateCartCommand, ValidationError> {
        let (user_id, date, products) = self.parts()?;
        Ok(UpdateCartCommand {
            cart_id,
            user_id,
            date,
            products,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub products: Vec<CartLineDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            id: view.id.to_string(),
            user_id: view.user_id.to_string(),
            date: view.date.to_rfc3339(),
            products: view
                .products
                .into_iter()
                .map(|item| CartLineDto {
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                })
                .collect(),
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProductId;

    #[test]
    fn parses_ids_and_date() {
        let user_id = UserId::new();
        let product_id = ProductId::new();
        let json = format!(
            r#"{{"user_id": "{}", "date": "2024-03-01T10:00:00Z",
                 "products": [{{"product_id": "{}", "quantity": 2}}]}}"#,
            user_id, product_id
        );
        let req: CartRequest = serde_json::from_str(&json).unwrap();

        let cmd = req.into_create_command().unwrap();

        assert_eq!(cmd.user_id, user_id);
        assert_eq!(cmd.products[0].product_id, product_id);
        assert!(cmd.date.is_some());
    }

    #[test]
    fn malformed_product_id_names_field() {
        let json = format!(
            r#"{{"user_id": "{}", "products": [{{"product_id": "x", "quantity": 1}}]}}"#,
            UserId::new()
        );
        let req: CartRequest = serde_json::from_str(&json).unwrap();
        let err = req.into_create_command().unwrap_err();
        assert_eq!(err.field(), "products.product_id");
    }

    #[test]
    fn negative_quantity_is_a_validation_error() {
        let json = format!(
            r#"{{"user_id": "{}", "products": [{{"product_id": "{}", "quantity": -2}}]}}"#,
            UserId::new(),
            ProductId::new()
        );
        let req: CartRequest = serde_json::from_str(&json).unwrap();
        let err = req.into_create_command().unwrap_err();
        assert_eq!(err.field(), "products.quantity");
    }
}
