//! Sale repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Repository, SaleId};
use crate::domain::sale::Sale;

/// Fields sales may be ordered by.
pub const SALE_SORT_FIELDS: &[&str] = &["sale_number", "sale_date", "total_amount", "created_at"];

/// Repository port for Sale aggregate persistence.
///
/// Sales are saved together with their items; `update` replaces all items.
#[async_trait]
pub trait SaleRepository: Repository<Sale, SaleId> {
    /// Find a sale by its business number.
    async fn find_by_sale_number(&self, sale_number: &str) -> Result<Option<Sale>, DomainError>;
}
