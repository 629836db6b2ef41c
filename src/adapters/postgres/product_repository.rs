//! PostgreSQL implementation of ProductRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, Page, PageRequest, ProductId, Repository, Timestamp,
};
use crate::domain::product::{Product, ProductDetails, Rating};
use crate::ports::ProductRepository;

use super::{corrupt_row, db_error, limit_offset, order_by};

const PRODUCT_COLUMNS: &str = r#"
    id, title, price_cents, description, category, image, rating_rate, rating_count,
    created_at, updated_at
"#;

/// PostgreSQL implementation of ProductRepository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        category: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let total: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE ($1::TEXT IS NULL OR category = $1)")
                .bind(category)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("count products", e))?;

        let (limit, offset) = limit_offset(request);
        let query = format!(
            "SELECT {} FROM products WHERE ($1::TEXT IS NULL OR category = $1) {} LIMIT $2 OFFSET $3",
            PRODUCT_COLUMNS,
            order_by(request, sort_column)
        );
        let rows = sqlx::query(&query)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch products", e))?;

        let products = rows
            .into_iter()
            .map(row_to_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(products, total.0.max(0) as u64, request))
    }
}

fn sort_column(field: &str) -> &'static str {
    match field {
        "title" => "title",
        "price" => "price_cents",
        "category" => "category",
        "rating" => "rating_rate",
        _ => "created_at",
    }
}

#[async_trait]
impl Repository<Product, ProductId> for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch product", e))?;

        row.map(row_to_product).transpose()
    }

    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        let rating = product.rating();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, title, price_cents, description, category, image,
                rating_rate, rating_count, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.title())
        .bind(product.price().cents())
        .bind(product.description())
        .bind(product.category())
        .bind(product.image())
        .bind(rating.rate())
        .bind(i64::from(rating.count()))
        .bind(product.created_at().as_datetime())
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert product", e))?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let rating = product.rating();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                title = $2,
                price_cents = $3,
                description = $4,
                category = $5,
                image = $6,
                rating_rate = $7,
                rating_count = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.title())
        .bind(product.price().cents())
        .bind(product.description())
        .bind(product.category())
        .bind(product.image())
        .bind(rating.rate())
        .bind(i64::from(rating.count()))
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update product", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", product.id()),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete product", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, DomainError> {
        self.fetch_page(None, request).await
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn categories(&self) -> Result<Vec<String>, DomainError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT category FROM products ORDER BY category")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("fetch categories", e))?;

        Ok(rows.into_iter().map(|(category,)| category).collect())
    }

    async fn find_by_category(
        &self,
        category: &str,
        request: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        self.fetch_page(Some(category), request).await
    }
}

fn row_to_product(row: PgRow) -> Result<Product, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_error("read products.id", e))?;
    let price_cents: i64 = row
        .try_get("price_cents")
        .map_err(|e| db_error("read products.price_cents", e))?;
    let rate: f64 = row
        .try_get("rating_rate")
        .map_err(|e| db_error("read products.rating_rate", e))?;
    let count: i64 = row
        .try_get("rating_count")
        .map_err(|e| db_error("read products.rating_count", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("read products.created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("read products.updated_at", e))?;

    let count = u32::try_from(count).map_err(|e| corrupt_row("rating_count", e))?;
    let details = ProductDetails {
        title: row.try_get("title").map_err(|e| db_error("read products.title", e))?,
        price: Money::from_cents(price_cents).map_err(|e| corrupt_row("price_cents", e))?,
        description: row
            .try_get("description")
            .map_err(|e| db_error("read products.description", e))?,
        category: row
            .try_get("category")
            .map_err(|e| db_error("read products.category", e))?,
        image: row.try_get("image").map_err(|e| db_error("read products.image", e))?,
        rating: Rating::new(rate, count).map_err(|e| corrupt_row("rating_rate", e))?,
    };

    Ok(Product::reconstitute(
        ProductId::from_uuid(id),
        details,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
