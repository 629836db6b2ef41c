//! DeleteSaleHandler - Command handler for removing a sale.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SaleId};
use crate::domain::sale::SaleError;
use crate::ports::SaleRepository;

use super::SaleView;

#[derive(Debug, Clone)]
pub struct DeleteSaleCommand {
    pub sale_id: SaleId,
}

pub struct DeleteSaleHandler {
    repository: Arc<dyn SaleRepository>,
}

impl DeleteSaleHandler {
    pub fn new(repository: Arc<dyn SaleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteSaleCommand,
        metadata: CommandMetadata,
    ) -> Result<SaleView, SaleError> {
        let sale = self
            .repository
            .find_by_id(&cmd.sale_id)
            .await?
            .ok_or_else(|| SaleError::not_found(cmd.sale_id))?;

        self.repository.delete(sale.id()).await?;

        tracing::info!(
            sale_id = %sale.id(),
            correlation_id = %metadata.correlation_id(),
            "sale deleted"
        );

        Ok(SaleView::from(&sale))
    }
}
