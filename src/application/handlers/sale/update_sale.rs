//! UpdateSaleHandler - Command handler for replacing a sale's header and items.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SaleId};
use crate::domain::sale::{SaleError, SaleModified};
use crate::ports::{EventPublisher, SaleRepository};

use super::{envelope, SaleInput, SaleView};

#[derive(Debug, Clone)]
pub struct UpdateSaleCommand {
    pub sale_id: SaleId,
    pub sale: SaleInput,
}

pub struct UpdateSaleHandler {
    repository: Arc<dyn SaleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateSaleHandler {
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
        cmd: UpdateSaleCommand,
        metadata: CommandMetadata,
    ) -> Result<SaleView, SaleError> {
        // 1. Load
        let mut sale = self
            .repository
            .find_by_id(&cmd.sale_id)
            .await?
            .ok_or_else(|| SaleError::not_found(cmd.sale_id))?;

        // 2. Re-price (fails on a cancelled sale)
        let (header, lines) = cmd.sale.into_parts()?;
        sale.update(header, lines)?;

        // 3. A new number must not collide with another sale
        if let Some(other) = self.repository.find_by_sale_number(sale.sale_number()).await? {
            if other.id() != sale.id() {
                return Err(SaleError::duplicate_sale_number(sale.sale_number()));
            }
        }

        // 4. Persist and publish
        self.repository.update(&sale).await?;
        let event = SaleModified::from_sale(&sale);
        self.event_publisher.publish(envelope(&event, &metadata)).await?;

        tracing::info!(
            sale_id = %sale.id(),
            total = %sale.total_amount(),
            correlation_id = %metadata.correlation_id(),
            "sale updated"
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
    use crate::domain::foundation::Repository;
    use crate::domain::sale::test_support::test_sale;
    use crate::domain::sale::Sale;

    struct Fixture {
        repo: Arc<InMemorySaleRepository>,
        bus: Arc<InMemoryEventBus>,
        handler: UpdateSaleHandler,
        sale: Sale,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(InMemorySaleRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let sale = test_sale("S-1");
        repo.save(&sale).await.unwrap();
        Fixture {
            handler: UpdateSaleHandler::new(repo.clone(), bus.clone()),
            repo,
            bus,
            sale,
        }
    }

    #[tokio::test]
    async fn reprices_items_and_publishes_modified() {
        let f = fixture().await;

        let view = f
            .handler
            .handle(
                UpdateSaleCommand { sale_id: *f.sale.id(), sale: sale_input("S-1", &[12]) },
                CommandMetadata::anonymous(),
            )
            .await
            .unwrap();

        // 12 x 10.00 - 20%
        assert_eq!(view.total_amount.cents(), 9600);
        assert_eq!(view.created_at, *f.sale.created_at());
        assert!(f.bus.has_event("sale.modified.v1"));
    }

    #[tokio::test]
    async fn taken_sale_number_is_conflict() {
        let f = fixture().await;
        f.repo.save(&test_sale("S-2")).await.unwrap();

        let result = f
            .handler
            .handle(
                UpdateSaleCommand { sale_id: *f.sale.id(), sale: sale_input("S-2", &[1]) },
                CommandMetadata::anonymous(),
            )
            .await;

        assert_eq!(result, Err(SaleError::DuplicateSaleNumber("S-2".to_string())));
        assert_eq!(f.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn cancelled_sale_cannot_change() {
        let f = fixture().await;
        let mut cancelled = f.sale.clone();
        cancelled.cancel().unwrap();
        f.repo.update(&cancelled).await.unwrap();

        let result = f
            .handler
            .handle(
                UpdateSaleCommand { sale_id: *f.sale.id(), sale: sale_input("S-1", &[1]) },
                CommandMetadata::anonymous(),
            )
            .await;

        assert_eq!(result, Err(SaleError::AlreadyCancelled));
    }
}
