//! HTTP DTOs for sale endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::response::{body_count, body_id};
use crate::application::handlers::sale::{SaleInput, SaleItemView, SaleLineInput, SaleView};
use crate::domain::foundation::{Money, Timestamp, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct SaleItemRequest {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Body of `POST /api/sales` and `PUT /api/sales/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleRequest {
    pub sale_number: String,
    #[serde(default)]
    pub sale_date: Option<DateTime<Utc>>,
    pub customer_id: String,
    pub customer_name: String,
    pub branch_id: String,
    pub branch_name: String,
    pub items: Vec<SaleItemRequest>,
}

impl SaleRequest {
    pub fn into_input(self) -> Result<SaleInput, ValidationError> {
        let items = self
            .items
            .into_iter()
            .map(|item| {
                Ok(SaleLineInput {
                    product_id: body_id(&item.product_id, "items.product_id")?,
                    product_name: item.product_name,
                    quantity: body_count(item.quantity, "items.quantity")?,
                    unit_price: item.unit_price,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(SaleInput {
            sale_number: self.sale_number,
            sale_date: self.sale_date.map(Timestamp::from_datetime),
            customer_id: body_id(&self.customer_id, "customer_id")?,
            customer_name: self.customer_name,
            branch_id: body_id(&self.branch_id, "branch_id")?,
            branch_name: self.branch_name,
            items,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleItemResponse {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub discount: Money,
    pub total: Money,
    pub is_cancelled: bool,
}

impl From<SaleItemView> for SaleItemResponse {
    fn from(item: SaleItemView) -> Self {
        Self {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
            total: item.total,
            is_cancelled: item.cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleResponse {
    pub id: String,
    pub sale_number: String,
    pub sale_date: String,
    pub customer_id: String,
    pub customer_name: String,
    pub branch_id: String,
    pub branch_name: String,
    pub items: Vec<SaleItemResponse>,
    pub total_amount: Money,
    pub is_cancelled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SaleView> for SaleResponse {
    fn from(view: SaleView) -> Self {
        Self {
            id: view.id.to_string(),
            sale_number: view.sale_number,
            sale_date: view.sale_date.to_rfc3339(),
            customer_id: view.customer.id.to_string(),
            customer_name: view.customer.name,
            branch_id: view.branch.id.to_string(),
            branch_name: view.branch.name,
            items: view.items.into_iter().map(SaleItemResponse::from).collect(),
            total_amount: view.total_amount,
            is_cancelled: view.cancelled,
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(customer_id: &str, quantity: i64) -> SaleRequest {
        serde_json::from_value(serde_json::json!({
            "sale_number": "S-9",
            "customer_id": customer_id,
            "customer_name": "Maria Silva",
            "branch_id": uuid::Uuid::new_v4().to_string(),
            "branch_name": "Centro",
            "items": [{
                "product_id": uuid::Uuid::new_v4().to_string(),
                "product_name": "Backpack",
                "quantity": quantity,
                "unit_price": 25.0
            }]
        }))
        .unwrap()
    }

    #[test]
    fn into_input_parses_ids_and_quantity() {
        let customer = uuid::Uuid::new_v4();
        let input = request(&customer.to_string(), 4).into_input().unwrap();
        assert_eq!(input.customer_id, customer);
        assert_eq!(input.items[0].quantity, 4);
    }

    #[test]
    fn malformed_customer_id_names_field() {
        let err = request("not-a-uuid", 1).into_input().unwrap_err();
        assert_eq!(err.field(), "customer_id");
    }

    #[test]
    fn negative_quantity_names_field() {
        let err = request(&uuid::Uuid::new_v4().to_string(), -1)
            .into_input()
            .unwrap_err();
        assert_eq!(err.field(), "items.quantity");
    }

    #[test]
    fn response_flattens_parties() {
        let sale = crate::domain::sale::test_support::test_sale("S-1");
        let response = SaleResponse::from(SaleView::from(&sale));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["customer_name"], "Maria Silva");
        assert_eq!(json["total_amount"], 110.0);
        assert_eq!(json["items"][1]["discount"], 10.0);
    }
}
