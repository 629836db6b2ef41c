//! In-memory sale repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, Repository, SaleId};
use crate::domain::sale::Sale;
use crate::ports::SaleRepository;

use super::paging::page_of;

#[derive(Debug, Clone, Default)]
pub struct InMemorySaleRepository {
    sales: Arc<RwLock<Vec<Sale>>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Sale, b: &Sale, field: &str) -> Ordering {
    match field {
        "sale_number" => a.sale_number().cmp(b.sale_number()),
        "sale_date" => a.sale_date().cmp(b.sale_date()),
        "total_amount" => a.total_amount().cmp(&b.total_amount()),
        "created_at" => a.created_at().cmp(b.created_at()),
        _ => Ordering::Equal,
    }
}

fn not_found(id: &SaleId) -> DomainError {
    DomainError::new(ErrorCode::SaleNotFound, format!("Sale not found: {}", id))
}

fn duplicate_number(sale: &Sale) -> DomainError {
    DomainError::new(ErrorCode::DuplicateSaleNumber, "Sale number already in use")
        .with_detail("sale_number", sale.sale_number())
}

#[async_trait]
impl Repository<Sale, SaleId> for InMemorySaleRepository {
    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        Ok(self.sales.read().await.iter().find(|s| s.id() == id).cloned())
    }

    async fn save(&self, sale: &Sale) -> Result<(), DomainError> {
        let mut sales = self.sales.write().await;
        if sales.iter().any(|s| s.id() == sale.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Sale already exists: {}", sale.id()),
            ));
        }
        if sales.iter().any(|s| s.sale_number() == sale.sale_number()) {
            return Err(duplicate_number(sale));
        }
        sales.push(sale.clone());
        Ok(())
    }

    async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
        let mut sales = self.sales.write().await;
        if sales
            .iter()
            .any(|s| s.id() != sale.id() && s.sale_number() == sale.sale_number())
        {
            return Err(duplicate_number(sale));
        }
        let slot = sales
            .iter_mut()
            .find(|s| s.id() == sale.id())
            .ok_or_else(|| not_found(sale.id()))?;
        *slot = sale.clone();
        Ok(())
    }

    async fn delete(&self, id: &SaleId) -> Result<(), DomainError> {
        let mut sales = self.sales.write().await;
        let index = sales
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| not_found(id))?;
        sales.remove(index);
        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Sale>, DomainError> {
        let sales = self.sales.read().await.clone();
        Ok(page_of(sales, request, compare))
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn find_by_sale_number(&self, sale_number: &str) -> Result<Option<Sale>, DomainError> {
        Ok(self
            .sales
            .read()
            .await
            .iter()
            .find(|s| s.sale_number() == sale_number)
            .cloned())
    }
}
