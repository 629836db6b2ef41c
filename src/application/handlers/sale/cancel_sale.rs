//! CancelSaleHandler - Command handler for cancelling a whole sale.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SaleId};
use crate::domain::sale::{SaleCancelled, SaleError};
use crate::ports::{EventPublisher, SaleRepository};

use super::{envelope, SaleView};

#[derive(Debug, Clone)]
pub struct CancelSaleCommand {
    pub sale_id: SaleId,
}

pub struct CancelSaleHandler {
    repository: Arc<dyn SaleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelSaleHandler {
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
        cmd: CancelSaleCommand,
        metadata: CommandMetadata,
    ) -> Result<SaleView, SaleError> {
        let mut sale = self
            .repository
            .find_by_id(&cmd.sale_id)
            .await?
            .ok_or_else(|| SaleError::not_found(cmd.sale_id))?;

        sale.cancel()?;
        self.repository.update(&sale).await?;

        let event = SaleCancelled::from_sale(&sale);
        self.event_publisher.publish(envelope(&event, &metadata)).await?;

        tracing::info!(
            sale_id = %sale.id(),
            correlation_id = %metadata.correlation_id(),
            "sale cancelled"
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

    #[tokio::test]
    async fn cancels_once_then_rejects() {
        let repo = Arc::new(InMemorySaleRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let sale = test_sale("S-1");
        repo.save(&sale).await.unwrap();
        let handler = CancelSaleHandler::new(repo.clone(), bus.clone());

        let view = handler
            .handle(CancelSaleCommand { sale_id: *sale.id() }, CommandMetadata::test_admin())
            .await
            .unwrap();
        assert!(view.cancelled);
        assert_eq!(bus.events_for_aggregate(&sale.id().to_string()).len(), 1);

        let again = handler
            .handle(CancelSaleCommand { sale_id: *sale.id() }, CommandMetadata::test_admin())
            .await;
        assert!(matches!(again, Err(SaleError::InvalidState(_))));
        assert_eq!(bus.event_count(), 1);
    }

    #[tokio::test]
    async fn event_records_actor() {
        let repo = Arc::new(InMemorySaleRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let sale = test_sale("S-1");
        repo.save(&sale).await.unwrap();
        let metadata = CommandMetadata::test_admin();
        let actor = metadata.actor_id().unwrap().to_string();

        CancelSaleHandler::new(repo, bus.clone())
            .handle(CancelSaleCommand { sale_id: *sale.id() }, metadata)
            .await
            .unwrap();

        let events = bus.events_of_type("sale.cancelled.v1");
        assert_eq!(events[0].metadata.user_id.as_deref(), Some(actor.as_str()));
    }
}
