//! Sale domain events.
//!
//! - `SaleCreated` - New sale recorded
//! - `SaleModified` - Header or items replaced
//! - `SaleCancelled` - Whole sale cancelled
//! - `ItemCancelled` - One item cancelled

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{
    domain_event, EventId, Money, ProductId, SaleId, SaleItemId, Timestamp,
};

use super::{Sale, SaleItem};

// ════════════════════════════════════════════════════════════════════════════
// SaleCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a sale is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreated {
    pub event_id: EventId,
    pub sale_id: SaleId,
    pub sale_number: String,
    pub customer_id: Uuid,
    pub branch_id: Uuid,
    pub total_amount: Money,
    pub item_count: usize,
    pub created_at: Timestamp,
}

impl SaleCreated {
    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            event_id: EventId::new(),
            sale_id: *sale.id(),
            sale_number: sale.sale_number().to_string(),
            customer_id: sale.customer().id,
            branch_id: sale.branch().id,
            total_amount: sale.total_amount(),
            item_count: sale.items().len(),
            created_at: *sale.created_at(),
        }
    }
}

domain_event!(
    SaleCreated,
    event_type = "sale.created.v1",
    aggregate_id = sale_id,
    aggregate_type = "Sale",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SaleModified
// ════════════════════════════════════════════════════════════════════════════

/// Published when a sale's header or items are replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleModified {
    pub event_id: EventId,
    pub sale_id: SaleId,
    pub sale_number: String,
    pub total_amount: Money,
    pub item_count: usize,
    pub modified_at: Timestamp,
}

impl SaleModified {
    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            event_id: EventId::new(),
            sale_id: *sale.id(),
            sale_number: sale.sale_number().to_string(),
            total_amount: sale.total_amount(),
            item_count: sale.items().len(),
            modified_at: *sale.updated_at(),
        }
    }
}

domain_event!(
    SaleModified,
    event_type = "sale.modified.v1",
    aggregate_id = sale_id,
    aggregate_type = "Sale",
    occurred_at = modified_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SaleCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a whole sale is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCancelled {
    pub event_id: EventId,
    pub sale_id: SaleId,
    pub sale_number: String,
    pub cancelled_at: Timestamp,
}

impl SaleCancelled {
    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            event_id: EventId::new(),
            sale_id: *sale.id(),
            sale_number: sale.sale_number().to_string(),
            cancelled_at: *sale.updated_at(),
        }
    }
}

domain_event!(
    SaleCancelled,
    event_type = "sale.cancelled.v1",
    aggregate_id = sale_id,
    aggregate_type = "Sale",
    occurred_at = cancelled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ItemCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when one item of a sale is cancelled.
///
/// Carries the sale's recomputed total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCancelled {
    pub event_id: EventId,
    pub sale_id: SaleId,
    pub item_id: SaleItemId,
    pub product_id: ProductId,
    pub item_total: Money,
    pub sale_total: Money,
    pub cancelled_at: Timestamp,
}

impl ItemCancelled {
    pub fn new(sale: &Sale, item: &SaleItem) -> Self {
        Self {
            event_id: EventId::new(),
            sale_id: *sale.id(),
            item_id: *item.id(),
            product_id: *item.product_id(),
            item_total: item.total(),
            sale_total: sale.total_amount(),
            cancelled_at: *sale.updated_at(),
        }
    }
}

domain_event!(
    ItemCancelled,
    event_type = "sale.item_cancelled.v1",
    aggregate_id = sale_id,
    aggregate_type = "Sale",
    occurred_at = cancelled_at,
    event_id = event_id
);
