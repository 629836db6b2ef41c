//! CancelSaleItemHandler - Command handler for cancelling one sale item.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SaleId, SaleItemId};
use crate::domain::sale::{ItemCancelled, SaleError};
use crate::ports::{EventPublisher, SaleRepository};

use super::{envelope, SaleView};

#[derive(Debug, Clone)]
pub struct CancelSaleItemCommand {
    pub sale_id: SaleId,
    pub item_id: SaleItemId,
}

pub struct CancelSaleItemHandler {
    repository: Arc<dyn SaleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelSaleItemHandler {
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
        cmd: CancelSaleItemCommand,
        metadata: CommandMetadata,
    ) -> Result<SaleView, SaleError> {
        // 1. Load
        let mut sale = self
            .repository
            .find_by_id(&cmd.sale_id)
            .await?
            .ok_or_else(|| SaleError::not_found(cmd.sale_id))?;

        // 2. Cancel the item; the total is recomputed
        let item = sale.cancel_item(&cmd.item_id)?.clone();

        // 3. Persist and publish
        self.repository.update(&sale).await?;
        let event = ItemCancelled::new(&sale, &item);
        self.event_publisher.publish(envelope(&event, &metadata)).await?;

        tracing::info!(
            sale_id = %sale.id(),
            item_id = %item.id(),
            total = %sale.total_amount(),
            correlation_id = %metadata.correlation_id(),
            "sale item cancelled"
        );

        Ok(SaleView::from(&sale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemorySaleRepository;
    use crate::domain::foundation::Repository;
    use crate::domain::sale::test_support::test_sale;
    use crate::domain::sale::Sale;

    async fn setup() -> (CancelSaleItemHandler, Arc<InMemorySaleRepository>, Arc<InMemoryEventBus>, Sale) {
        let repo = Arc::new(InMemorySaleRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let sale = test_sale("S-1");
        repo.save(&sale).await.unwrap();
        (CancelSaleItemHandler::new(repo.clone(), bus.clone()), repo, bus, sale)
    }

    #[tokio::test]
    async fn cancels_item_and_recomputes_total() {
        let (handler, repo, bus, sale) = setup().await;
        let item_id = *sale.items()[0].id();

        let view = handler
            .handle(CancelSaleItemCommand { sale_id: *sale.id(), item_id }, CommandMetadata::anonymous())
            .await
            .unwrap();

        // only the 5 x 20.00 - 10% line remains
        assert_eq!(view.total_amount.cents(), 9000);
        assert!(view.items[0].cancelled);
        let stored = repo.find_by_id(sale.id()).await.unwrap().unwrap();
        assert_eq!(stored.total_amount().cents(), 9000);

        let events = bus.events_of_type("sale.item_cancelled.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload["sale_total"], 90.0);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let (handler, _, _, sale) = setup().await;
        let item_id = SaleItemId::new();

        let result = handler
            .handle(CancelSaleItemCommand { sale_id: *sale.id(), item_id }, CommandMetadata::anonymous())
            .await;

        assert_eq!(result, Err(SaleError::ItemNotFound(item_id)));
    }

    #[tokio::test]
    async fn cancelling_twice_is_invalid_state() {
        let (handler, _, bus, sale) = setup().await;
        let cmd = CancelSaleItemCommand { sale_id: *sale.id(), item_id: *sale.items()[1].id() };

        handler.handle(cmd.clone(), CommandMetadata::anonymous()).await.unwrap();
        let result = handler.handle(cmd, CommandMetadata::anonymous()).await;

        assert!(matches!(result, Err(SaleError::InvalidState(_))));
        assert_eq!(bus.event_count(), 1);
    }
}
