//! PostgreSQL implementation of SaleRepository.
//!
//! Items are stored priced, so reads never re-run the discount policy.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, Page, PageRequest, ProductId, Repository, SaleId, SaleItemId,
    Timestamp,
};
use crate::domain::sale::{PartyRef, Sale, SaleHeader, SaleItem};
use crate::ports::SaleRepository;

use super::{corrupt_row, db_error, limit_offset, order_by, violates};

const SALE_NUMBER_CONSTRAINT: &str = "sales_sale_number_key";

const SALE_COLUMNS: &str = r#"
    id, sale_number, sale_date, customer_id, customer_name, branch_id, branch_name,
    total_amount_cents, cancelled, created_at, updated_at
"#;

/// PostgreSQL implementation of SaleRepository.
#[derive(Clone)]
pub struct PostgresSaleRepository {
    pool: PgPool,
}

impl PostgresSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, sale_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<SaleItem>>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, sale_id, product_id, product_name, quantity,
                   unit_price_cents, discount_cents, total_cents, cancelled
            FROM sale_items
            WHERE sale_id = ANY($1)
            ORDER BY sale_id, position
            "#,
        )
        .bind(sale_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch sale items", e))?;

        let mut items: HashMap<Uuid, Vec<SaleItem>> = HashMap::new();
        for row in rows {
            let sale_id: Uuid = row
                .try_get("sale_id")
                .map_err(|e| db_error("read sale_items.sale_id", e))?;
            items.entry(sale_id).or_default().push(row_to_item(&row)?);
        }

        Ok(items)
    }

    /// Loads items for already-fetched sale rows and assembles the sales.
    async fn assemble(&self, rows: Vec<PgRow>) -> Result<Vec<Sale>, DomainError> {
        let ids = rows
            .iter()
            .map(|row| row.try_get::<Uuid, _>("id"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| db_error("read sales.id", e))?;
        let mut items = self.load_items(&ids).await?;

        rows.into_iter()
            .zip(ids)
            .map(|(row, id)| row_to_sale(row, items.remove(&id).unwrap_or_default()))
            .collect()
    }

    async fn complete(&self, row: Option<PgRow>) -> Result<Option<Sale>, DomainError> {
        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn insert_items(tx: &mut Transaction<'_, Postgres>, sale: &Sale) -> Result<(), DomainError> {
        for (position, item) in sale.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    id, sale_id, position, product_id, product_name, quantity,
                    unit_price_cents, discount_cents, total_cents, cancelled
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(item.id().as_uuid())
            .bind(sale.id().as_uuid())
            .bind(position as i32)
            .bind(item.product_id().as_uuid())
            .bind(item.product_name())
            .bind(i64::from(item.quantity()))
            .bind(item.unit_price().cents())
            .bind(item.discount().cents())
            .bind(item.total().cents())
            .bind(item.is_cancelled())
            .execute(&mut **tx)
            .await
            .map_err(|e| db_error("insert sale item", e))?;
        }
        Ok(())
    }
}

fn sort_column(field: &str) -> &'static str {
    match field {
        "sale_number" => "sale_number",
        "sale_date" => "sale_date",
        "total_amount" => "total_amount_cents",
        _ => "created_at",
    }
}

fn write_error(action: &str, sale: &Sale, e: sqlx::Error) -> DomainError {
    if violates(&e, SALE_NUMBER_CONSTRAINT) {
        return DomainError::new(ErrorCode::DuplicateSaleNumber, "Sale number already in use")
            .with_detail("sale_number", sale.sale_number());
    }
    db_error(action, e)
}

#[async_trait]
impl Repository<Sale, SaleId> for PostgresSaleRepository {
    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        let query = format!("SELECT {} FROM sales WHERE id = $1", SALE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch sale", e))?;

        self.complete(row).await
    }

    async fn save(&self, sale: &Sale) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let header = sale.header();
        sqlx::query(
            r#"
            INSERT INTO sales (
                id, sale_number, sale_date, customer_id, customer_name, branch_id, branch_name,
                total_amount_cents, cancelled, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(sale.id().as_uuid())
        .bind(&header.sale_number)
        .bind(header.sale_date.as_datetime())
        .bind(header.customer.id)
        .bind(&header.customer.name)
        .bind(header.branch.id)
        .bind(&header.branch.name)
        .bind(sale.total_amount().cents())
        .bind(sale.is_cancelled())
        .bind(sale.created_at().as_datetime())
        .bind(sale.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("insert sale", sale, e))?;

        Self::insert_items(&mut tx, sale).await?;

        tx.commit().await.map_err(|e| db_error("commit sale", e))
    }

    async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let header = sale.header();
        let result = sqlx::query(
            r#"
            UPDATE sales SET
                sale_number = $2,
                sale_date = $3,
                customer_id = $4,
                customer_name = $5,
                branch_id = $6,
                branch_name = $7,
                total_amount_cents = $8,
                cancelled = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(sale.id().as_uuid())
        .bind(&header.sale_number)
        .bind(header.sale_date.as_datetime())
        .bind(header.customer.id)
        .bind(&header.customer.name)
        .bind(header.branch.id)
        .bind(&header.branch.name)
        .bind(sale.total_amount().cents())
        .bind(sale.is_cancelled())
        .bind(sale.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("update sale", sale, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SaleNotFound,
                format!("Sale not found: {}", sale.id()),
            ));
        }

        sqlx::query("DELETE FROM sale_items WHERE sale_id = $1")
            .bind(sale.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("replace sale items", e))?;

        Self::insert_items(&mut tx, sale).await?;

        tx.commit().await.map_err(|e| db_error("commit sale", e))
    }

    async fn delete(&self, id: &SaleId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete sale", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SaleNotFound,
                format!("Sale not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Sale>, DomainError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count sales", e))?;

        let (limit, offset) = limit_offset(request);
        let query = format!(
            "SELECT {} FROM sales {} LIMIT $1 OFFSET $2",
            SALE_COLUMNS,
            order_by(request, sort_column)
        );
        let rows = sqlx::query(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch sales", e))?;

        let sales = self.assemble(rows).await?;
        Ok(Page::new(sales, total.0.max(0) as u64, request))
    }
}

#[async_trait]
impl SaleRepository for PostgresSaleRepository {
    async fn find_by_sale_number(&self, sale_number: &str) -> Result<Option<Sale>, DomainError> {
        let query = format!("SELECT {} FROM sales WHERE sale_number = $1", SALE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(sale_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch sale by number", e))?;

        self.complete(row).await
    }
}

fn money(row: &PgRow, column: &str) -> Result<Money, DomainError> {
    let cents: i64 = row
        .try_get(column)
        .map_err(|e| db_error(&format!("read {}", column), e))?;
    Money::from_cents(cents).map_err(|e| corrupt_row(column, e))
}

fn row_to_item(row: &PgRow) -> Result<SaleItem, DomainError> {
    let id: Uuid = row.try_get("id").map_err(|e| db_error("read sale_items.id", e))?;
    let product_id: Uuid = row
        .try_get("product_id")
        .map_err(|e| db_error("read sale_items.product_id", e))?;
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| db_error("read sale_items.quantity", e))?;

    Ok(SaleItem::reconstitute(
        SaleItemId::from_uuid(id),
        ProductId::from_uuid(product_id),
        row.try_get("product_name")
            .map_err(|e| db_error("read sale_items.product_name", e))?,
        u32::try_from(quantity).map_err(|e| corrupt_row("quantity", e))?,
        money(row, "unit_price_cents")?,
        money(row, "discount_cents")?,
        money(row, "total_cents")?,
        row.try_get("cancelled")
            .map_err(|e| db_error("read sale_items.cancelled", e))?,
    ))
}

fn row_to_sale(row: PgRow, items: Vec<SaleItem>) -> Result<Sale, DomainError> {
    let get_uuid = |column: &str| -> Result<Uuid, DomainError> {
        row.try_get(column)
            .map_err(|e| db_error(&format!("read sales.{}", column), e))
    };
    let get_time = |column: &str| -> Result<Timestamp, DomainError> {
        row.try_get::<DateTime<Utc>, _>(column)
            .map(Timestamp::from_datetime)
            .map_err(|e| db_error(&format!("read sales.{}", column), e))
    };
    let get_str = |column: &str| -> Result<String, DomainError> {
        row.try_get(column)
            .map_err(|e| db_error(&format!("read sales.{}", column), e))
    };

    let header = SaleHeader {
        sale_number: get_str("sale_number")?,
        sale_date: get_time("sale_date")?,
        customer: PartyRef {
            id: get_uuid("customer_id")?,
            name: get_str("customer_name")?,
        },
        branch: PartyRef {
            id: get_uuid("branch_id")?,
            name: get_str("branch_name")?,
        },
    };

    Ok(Sale::reconstitute(
        SaleId::from_uuid(get_uuid("id")?),
        header,
        items,
        money(&row, "total_amount_cents")?,
        row.try_get("cancelled")
            .map_err(|e| db_error("read sales.cancelled", e))?,
        get_time("created_at")?,
        get_time("updated_at")?,
    ))
}
