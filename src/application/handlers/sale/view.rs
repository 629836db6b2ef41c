//! Read model and input shapes for sale handlers.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::foundation::{Money, ProductId, SaleId, SaleItemId, Timestamp};
use crate::domain::sale::{PartyRef, Sale, SaleError, SaleHeader, SaleItem, SaleLine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleItemView {
    pub id: SaleItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub discount: Money,
    pub total: Money,
    pub cancelled: bool,
}

impl From<&SaleItem> for SaleItemView {
    fn from(item: &SaleItem) -> Self {
        Self {
            id: *item.id(),
            product_id: *item.product_id(),
            product_name: item.product_name().to_string(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            discount: item.discount(),
            total: item.total(),
            cancelled: item.is_cancelled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleView {
    pub id: SaleId,
    pub sale_number: String,
    pub sale_date: Timestamp,
    pub customer: PartyRef,
    pub branch: PartyRef,
    pub items: Vec<SaleItemView>,
    pub total_amount: Money,
    pub cancelled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Sale> for SaleView {
    fn from(sale: &Sale) -> Self {
        Self {
            id: *sale.id(),
            sale_number: sale.sale_number().to_string(),
            sale_date: *sale.sale_date(),
            customer: sale.customer().clone(),
            branch: sale.branch().clone(),
            items: sale.items().iter().map(SaleItemView::from).collect(),
            total_amount: sale.total_amount(),
            cancelled: sale.is_cancelled(),
            created_at: *sale.created_at(),
            updated_at: *sale.updated_at(),
        }
    }
}

/// One requested sale line, not yet priced.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLineInput {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Decimal currency units.
    pub unit_price: f64,
}

/// Header and lines shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleInput {
    pub sale_number: String,
    /// Defaults to now.
    pub sale_date: Option<Timestamp>,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub branch_id: Uuid,
    pub branch_name: String,
    pub items: Vec<SaleLineInput>,
}

impl SaleInput {
    pub fn into_parts(self) -> Result<(SaleHeader, Vec<SaleLine>), SaleError> {
        let header = SaleHeader {
            sale_number: self.sale_number,
            sale_date: self.sale_date.unwrap_or_else(Timestamp::now),
            customer: PartyRef::new("customer", self.customer_id, self.customer_name)?,
            branch: PartyRef::new("branch", self.branch_id, self.branch_name)?,
        };

        let lines = self
            .items
            .into_iter()
            .map(|line| {
                let unit_price = Money::from_decimal(line.unit_price)
                    .map_err(|e| SaleError::validation("items.unit_price", e.to_string()))?;
                Ok(SaleLine {
                    product_id: line.product_id,
                    product_name: line.product_name,
                    quantity: line.quantity,
                    unit_price,
                })
            })
            .collect::<Result<Vec<_>, SaleError>>()?;

        Ok((header, lines))
    }
}

#[cfg(test)]
pub(crate) fn sale_input(sale_number: &str, quantities: &[u32]) -> SaleInput {
    SaleInput {
        sale_number: sale_number.to_string(),
        sale_date: None,
        customer_id: Uuid::new_v4(),
        customer_name: "Maria Silva".to_string(),
        branch_id: Uuid::new_v4(),
        branch_name: "Downtown".to_string(),
        items: quantities
            .iter()
            .map(|&quantity| SaleLineInput {
                product_id: ProductId::new(),
                product_name: "Coffee beans".to_string(),
                quantity,
                unit_price: 10.0,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_customer_name_is_rejected() {
        let mut input = sale_input("S-1", &[1]);
        input.customer_name = " ".to_string();
        let err = input.into_parts().unwrap_err();
        assert!(matches!(err, SaleError::ValidationFailed { ref field, .. } if field == "customer.name"));
    }

    #[test]
    fn view_exposes_item_discounts() {
        let sale = crate::domain::sale::test_support::test_sale("S-2");
        let view = SaleView::from(&sale);
        assert_eq!(view.items[1].discount.cents(), 1000);
        assert_eq!(view.total_amount.cents(), 11000);
    }
}
