//! CreateSaleHandler - Command handler for recording a sale.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SaleId};
use crate::domain::sale::{Sale, SaleCreated, SaleError};
use crate::ports::{EventPublisher, SaleRepository};

use super::{envelope, SaleInput, SaleView};

#[derive(Debug, Clone)]
pub struct CreateSaleCommand {
    pub sale: SaleInput,
}

pub struct CreateSaleHandler {
    repository: Arc<dyn SaleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateSaleHandler {
    pub fn new(
        repository: Arc<dyn SaleRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSaleCommand,
        metadata: CommandMetadata,
    ) -> Result<SaleView, SaleError> {
        // 1. Price lines and build the aggregate
        let (header, lines) = cmd.sale.into_parts()?;
        let sale = Sale::new(SaleId::new(), header, lines)?;

        // 2. Sale number must be unique
        if self
            .repository
            .find_by_sale_number(sale.sale_number())
            .await?
            .is_some()
        {
            return Err(SaleError::duplicate_sale_number(sale.sale_number()));
        }

        // 3. Persist
        self.repository.save(&sale).await?;

        // 4. Publish
        let event = SaleCreated::from_sale(&sale);
        self.event_publisher.publish(envelope(&event, &metadata)).await?;

        tracing::info!(
            sale_id = %sale.id(),
            sale_number = %sale.sale_number(),
            total = %sale.total_amount(),
            correlation_id = %metadata.correlation_id(),
            "sale created"
        );

        Ok(SaleView::from(&sale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemorySaleRepository;
    use crate::application::handlers::sale::sale_input;

    fn handler() -> (CreateSaleHandler, Arc<InMemoryEventBus>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = CreateSaleHandler::new(Arc::new(InMemorySaleRepository::new()), bus.clone());
        (handler, bus)
    }

    #[tokio::test]
    async fn applies_discount_tiers_and_publishes_event() {
        let (handler, bus) = handler();

        let view = handler
            .handle(
                CreateSaleCommand { sale: sale_input("S-1", &[3, 4, 10]) },
                CommandMetadata::test_admin().with_correlation_id("req-1"),
            )
            .await
            .unwrap();

        let discounts: Vec<i64> = view.items.iter().map(|i| i.discount.cents()).collect();
        assert_eq!(discounts, [0, 400, 2000]);
        // 30 + 36 + 80
        assert_eq!(view.total_amount.cents(), 14600);

        let events = bus.events_of_type("sale.created.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, view.id.to_string());
        assert_eq!(events[0].metadata.correlation_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    async fn more_than_twenty_identical_items_is_rejected() {
        let (handler, bus) = handler();

        let result = handler
            .handle(
                CreateSaleCommand { sale: sale_input("S-1", &[21]) },
                CommandMetadata::anonymous(),
            )
            .await;

        assert!(matches!(result, Err(SaleError::ValidationFailed { .. })));
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_sale_number_is_conflict() {
        let (handler, bus) = handler();
        handler
            .handle(CreateSaleCommand { sale: sale_input("S-1", &[1]) }, CommandMetadata::anonymous())
            .await
            .unwrap();

        let result = handler
            .handle(CreateSaleCommand { sale: sale_input("S-1", &[2]) }, CommandMetadata::anonymous())
            .await;

        assert_eq!(result, Err(SaleError::DuplicateSaleNumber("S-1".to_string())));
        assert_eq!(bus.event_count(), 1);
    }

    #[tokio::test]
    async fn sale_without_items_is_rejected() {
        let (handler, _) = handler();
        let result = handler
            .handle(CreateSaleCommand { sale: sale_input("S-1", &[]) }, CommandMetadata::anonymous())
            .await;
        assert!(matches!(result, Err(SaleError::ValidationFailed { ref field, .. }) if field == "items"));
    }
}
