//! ListCartsHandler - Query handler for paging through carts.

use std::sync::Arc;

use crate::domain::cart::CartError;
use crate::domain::foundation::{Page, PageRequest};
use crate::ports::CartRepository;

use super::CartView;

#[derive(Debug, Clone, Default)]
pub struct ListCartsQuery {
    pub page: PageRequest,
}

pub struct ListCartsHandler {
    repository: Arc<dyn CartRepository>,
}

impl ListCartsHandler {
    pub fn new(repository: Arc<dyn CartRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListCartsQuery) -> Result<Page<CartView>, CartError> {
        let page = self.repository.find_page(&query.page).await?;
        Ok(page.map(|cart| CartView::from(&cart)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCartRepository;
    use crate::domain::cart::Cart;
    use crate::domain::foundation::{CartId, Repository, Timestamp, UserId};

    #[tokio::test]
    async fn pages_carts() {
        let repo = Arc::new(InMemoryCartRepository::new());
        for _ in 0..3 {
            let cart = Cart::new(CartId::new(), UserId::new(), Timestamp::now(), vec![]);
            repo.save(&cart).await.unwrap();
        }
        let page = PageRequest { page: 1, size: 2, order: vec![] };

        let result = ListCartsHandler::new(repo)
            .handle(ListCartsQuery { page })
            .await
            .unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_items, 3);
        assert_eq!(result.total_pages, 2);
    }
}
