//! GetSaleHandler - Query handler for one sale.

use std::sync::Arc;

use crate::domain::foundation::SaleId;
use crate::domain::sale::SaleError;
use crate::ports::SaleRepository;

use super::SaleView;

#[derive(Debug, Clone)]
pub struct GetSaleQuery {
    pub sale_id: SaleId,
}

pub struct GetSaleHandler {
    repository: Arc<dyn SaleRepository>,
}

impl GetSaleHandler {
    pub fn new(repository: Arc<dyn SaleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSaleQuery) -> Result<SaleView, SaleError> {
        let sale = self
            .repository
            .find_by_id(&query.sale_id)
            .await?
            .ok_or_else(|| SaleError::not_found(query.sale_id))?;

        Ok(SaleView::from(&sale))
    }
}
