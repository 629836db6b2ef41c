//! Sale command and query handlers.
//!
//! Every state change publishes a sale event after the sale is persisted.

mod cancel_sale;
mod cancel_sale_item;
mod create_sale;
mod delete_sale;
mod get_sale;
mod list_sales;
mod update_sale;
mod view;

pub use cancel_sale::{CancelSaleCommand, CancelSaleHandler};
pub use cancel_sale_item::{CancelSaleItemCommand, CancelSaleItemHandler};
pub use create_sale::{CreateSaleCommand, CreateSaleHandler};
pub use delete_sale::{DeleteSaleCommand, DeleteSaleHandler};
pub use get_sale::{GetSaleHandler, GetSaleQuery};
pub use list_sales::{ListSalesHandler, ListSalesQuery};
pub use update_sale::{UpdateSaleCommand, UpdateSaleHandler};
pub use view::{SaleInput, SaleItemView, SaleLineInput, SaleView};

#[cfg(test)]
pub(crate) use view::sale_input;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, SerializableDomainEvent};

/// Wraps an event with the request's correlation and actor.
fn envelope(event: &impl SerializableDomainEvent, metadata: &CommandMetadata) -> EventEnvelope {
    let envelope = event
        .to_envelope()
        .with_correlation_id(metadata.correlation_id());
    match metadata.actor_id() {
        Some(user_id) => envelope.with_user_id(user_id.to_string()),
        None => envelope,
    }
}
