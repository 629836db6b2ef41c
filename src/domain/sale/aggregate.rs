//! Sale aggregate.
//!
//! A sale records what a branch sold to a customer. Customers, branches and
//! products live in other systems, so the sale keeps their ID together with a
//! denormalized display name (`PartyRef`, `product_name`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, ProductId, SaleId, SaleItemId, Timestamp, ValidationError,
};

use super::discount::price_item;

/// Maximum length for a sale number.
pub const MAX_SALE_NUMBER_LENGTH: usize = 50;

/// Reference to an entity owned by another system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRef {
    pub id: Uuid,
    pub name: String,
}

impl PartyRef {
    pub fn new(field: &str, id: Uuid, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field(format!("{}.name", field)));
        }
        Ok(Self { id, name })
    }
}

/// Sale header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleHeader {
    pub sale_number: String,
    pub sale_date: Timestamp,
    pub customer: PartyRef,
    pub branch: PartyRef,
}

impl SaleHeader {
    fn validated(mut self) -> Result<Self, DomainError> {
        self.sale_number = self.sale_number.trim().to_string();
        if self.sale_number.is_empty() {
            return Err(ValidationError::empty_field("sale_number").into());
        }
        let len = self.sale_number.chars().count();
        if len > MAX_SALE_NUMBER_LENGTH {
            return Err(ValidationError::out_of_range(
                "sale_number",
                1,
                MAX_SALE_NUMBER_LENGTH as i64,
                len as i64,
            )
            .into());
        }
        Ok(self)
    }
}

/// Requested line before pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// One priced product line of a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleItem {
    id: SaleItemId,
    product_id: ProductId,
    product_name: String,
    quantity: u32,
    unit_price: Money,
    discount: Money,
    total: Money,
    cancelled: bool,
}

impl SaleItem {
    /// Price a line through the discount policy.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for an empty product name, a zero unit price or a
    ///   quantity the policy rejects
    pub fn price(id: SaleItemId, line: SaleLine) -> Result<Self, DomainError> {
        let product_name = line.product_name.trim().to_string();
        if product_name.is_empty() {
            return Err(ValidationError::empty_field("items.product_name").into());
        }
        if line.unit_price.is_zero() {
            return Err(DomainError::validation(
                "items.unit_price",
                "Unit price must be greater than zero",
            ));
        }

        let pricing = price_item(line.unit_price, line.quantity)?;

        Ok(Self {
            id,
            product_id: line.product_id,
            product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            discount: pricing.discount,
            total: pricing.total,
            cancelled: false,
        })
    }

    /// Reconstitute an item from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SaleItemId,
        product_id: ProductId,
        product_name: String,
        quantity: u32,
        unit_price: Money,
        discount: Money,
        total: Money,
        cancelled: bool,
    ) -> Self {
        Self {
            id,
            product_id,
            product_name,
            quantity,
            unit_price,
            discount,
            total,
            cancelled,
        }
    }

    pub fn id(&self) -> &SaleItemId {
        &self.id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// A recorded sale.
///
/// # Invariants
///
/// - `sale_number` is 1-50 characters (uniqueness is checked by handlers)
/// - At least one item, and each product appears at most once
/// - `total_amount` is the sum of the totals of non-cancelled items
/// - A cancelled sale cannot be modified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    id: SaleId,
    header: SaleHeader,
    items: Vec<SaleItem>,
    total_amount: Money,
    cancelled: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Sale {
    /// Create a new sale, pricing every line.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a bad header, no lines, a repeated product or
    ///   a line the discount policy rejects
    pub fn new(id: SaleId, header: SaleHeader, lines: Vec<SaleLine>) -> Result<Self, DomainError> {
        let header = header.validated()?;
        let items = Self::price_lines(lines)?;

        let now = Timestamp::now();
        let mut sale = Self {
            id,
            header,
            items,
            total_amount: Money::ZERO,
            cancelled: false,
            created_at: now,
            updated_at: now,
        };
        sale.recalculate_total();
        Ok(sale)
    }

    /// Reconstitute a sale from persistence (no validation).
    pub fn reconstitute(
        id: SaleId,
        header: SaleHeader,
        items: Vec<SaleItem>,
        total_amount: Money,
        cancelled: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            header,
            items,
            total_amount,
            cancelled,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SaleId {
        &self.id
    }

    pub fn header(&self) -> &SaleHeader {
        &self.header
    }

    pub fn sale_number(&self) -> &str {
        &self.header.sale_number
    }

    pub fn sale_date(&self) -> &Timestamp {
        &self.header.sale_date
    }

    pub fn customer(&self) -> &PartyRef {
        &self.header.customer
    }

    pub fn branch(&self) -> &PartyRef {
        &self.header.branch
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    pub fn item(&self, item_id: &SaleItemId) -> Option<&SaleItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace header and items, re-pricing every line.
    ///
    /// # Errors
    ///
    /// - `SaleCancelled` if the sale is cancelled
    /// - `ValidationFailed` as for `new`; the sale is left unchanged
    pub fn update(&mut self, header: SaleHeader, lines: Vec<SaleLine>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        let header = header.validated()?;
        let items = Self::price_lines(lines)?;

        self.header = header;
        self.items = items;
        self.recalculate_total();
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel the whole sale.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already cancelled
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.cancelled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Sale is already cancelled",
            ));
        }
        self.cancelled = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel one item and recompute the total.
    ///
    /// # Errors
    ///
    /// - `SaleCancelled` if the sale is cancelled
    /// - `SaleItemNotFound` if no item has this ID
    /// - `InvalidStateTransition` if the item is already cancelled
    pub fn cancel_item(&mut self, item_id: &SaleItemId) -> Result<&SaleItem, DomainError> {
        self.ensure_mutable()?;

        let index = self
            .items
            .iter()
            .position(|i| &i.id == item_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SaleItemNotFound, "Sale item not found")
                    .with_detail("item_id", item_id.to_string())
            })?;

        if self.items[index].cancelled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Sale item is already cancelled",
            ));
        }

        self.items[index].cancelled = true;
        self.recalculate_total();
        self.updated_at = Timestamp::now();
        Ok(&self.items[index])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.cancelled {
            Err(DomainError::new(
                ErrorCode::SaleCancelled,
                "Cannot modify a cancelled sale",
            ))
        } else {
            Ok(())
        }
    }

    fn recalculate_total(&mut self) {
        self.total_amount = self
            .items
            .iter()
            .filter(|i| !i.cancelled)
            .map(|i| i.total)
            .sum();
    }

    fn price_lines(lines: Vec<SaleLine>) -> Result<Vec<SaleItem>, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::validation("items", "A sale needs at least one item"));
        }

        let mut items: Vec<SaleItem> = Vec::with_capacity(lines.len());
        for line in lines {
            if items.iter().any(|i| i.product_id == line.product_id) {
                return Err(DomainError::validation(
                    "items.product_id",
                    format!("Product {} appears more than once", line.product_id),
                ));
            }
            items.push(SaleItem::price(SaleItemId::new(), line)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn header(sale_number: &str) -> SaleHeader {
        SaleHeader {
            sale_number: sale_number.to_string(),
            sale_date: Timestamp::now(),
            customer: PartyRef::new("customer", Uuid::new_v4(), "Maria Silva").unwrap(),
            branch: PartyRef::new("branch", Uuid::new_v4(), "Downtown").unwrap(),
        }
    }

    pub fn line(quantity: u32, unit_cents: i64) -> SaleLine {
        SaleLine {
            product_id: ProductId::new(),
            product_name: "Coffee beans".to_string(),
            quantity,
            unit_price: Money::from_cents(unit_cents).unwrap(),
        }
    }

    pub fn test_sale(sale_number: &str) -> Sale {
        Sale::new(
            SaleId::new(),
            header(sale_number),
            vec![line(2, 1000), line(5, 2000)],
        )
        .unwrap()
    }
}
