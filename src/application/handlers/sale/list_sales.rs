//! ListSalesHandler - Query handler for paging through sales.

use std::sync::Arc;

use crate::domain::foundation::{Page, PageRequest};
use crate::domain::sale::SaleError;
use crate::ports::SaleRepository;

use super::SaleView;

#[derive(Debug, Clone, Default)]
pub struct ListSalesQuery {
    pub page: PageRequest,
}

pub struct ListSalesHandler {
    repository: Arc<dyn SaleRepository>,
}

impl ListSalesHandler {
    pub fn new(repository: Arc<dyn SaleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListSalesQuery) -> Result<Page<SaleView>, SaleError> {
        let page = self.repository.find_page(&query.page).await?;
        Ok(page.map(|sale| SaleView::from(&sale)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySaleRepository;
    use crate::domain::foundation::Repository;
    use crate::domain::sale::test_support::test_sale;
    use crate::ports::SALE_SORT_FIELDS;

    #[tokio::test]
    async fn orders_by_sale_number() {
        let repo = Arc::new(InMemorySaleRepository::new());
        for number in ["S-2", "S-3", "S-1"] {
            repo.save(&test_sale(number)).await.unwrap();
        }
        let page = PageRequest::parse(None, None, Some("sale_number"), SALE_SORT_FIELDS).unwrap();

        let result = ListSalesHandler::new(repo)
            .handle(ListSalesQuery { page })
            .await
            .unwrap();

        let numbers: Vec<_> = result.items.iter().map(|s| s.sale_number.as_str()).collect();
        assert_eq!(numbers, ["S-1", "S-2", "S-3"]);
    }
}
