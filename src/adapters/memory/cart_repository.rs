//! In-memory cart repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cart::Cart;
use crate::domain::foundation::{CartId, DomainError, ErrorCode, Page, PageRequest, Repository};
use crate::ports::CartRepository;

use super::paging::page_of;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCartRepository {
    carts: Arc<RwLock<Vec<Cart>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Cart, b: &Cart, field: &str) -> Ordering {
    match field {
        "date" => a.date().cmp(b.date()),
        "user_id" => a.user_id().cmp(b.user_id()),
        "created_at" => a.created_at().cmp(b.created_at()),
        _ => Ordering::Equal,
    }
}

fn not_found(id: &CartId) -> DomainError {
    DomainError::new(ErrorCode::CartNotFound, format!("Cart not found: {}", id))
}

#[async_trait]
impl Repository<Cart, CartId> for InMemoryCartRepository {
    async fn find_by_id(&self, id: &CartId) -> Result<Option<Cart>, DomainError> {
        Ok(self.carts.read().await.iter().find(|c| c.id() == id).cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut carts = self.carts.write().await;
        if carts.iter().any(|c| c.id() == cart.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Cart already exists: {}", cart.id()),
            ));
        }
        carts.push(cart.clone());
        Ok(())
    }

    async fn update(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut carts = self.carts.write().await;
        let slot = carts
            .iter_mut()
            .find(|c| c.id() == cart.id())
            .ok_or_else(|| not_found(cart.id()))?;
        *slot = cart.clone();
        Ok(())
    }

    async fn delete(&self, id: &CartId) -> Result<(), DomainError> {
        let mut carts = self.carts.write().await;
        let index = carts
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| not_found(id))?;
        carts.remove(index);
        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Cart>, DomainError> {
        let carts = self.carts.read().await.clone();
        Ok(page_of(carts, request, compare))
    }
}

impl CartRepository for InMemoryCartRepository {}
