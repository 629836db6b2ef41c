//! PostgreSQL implementation of CartRepository.
//!
//! A cart is one `carts` row plus its `cart_items` lines, written in a
//! single transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::foundation::{
    CartId, DomainError, ErrorCode, Page, PageRequest, ProductId, Repository, Timestamp, UserId,
};
use crate::ports::CartRepository;

use super::{corrupt_row, db_error, limit_offset, order_by};

/// PostgreSQL implementation of CartRepository.
#[derive(Clone)]
pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the lines of every listed cart, in their stored order.
    async fn load_items(&self, cart_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<CartItem>>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT cart_id, product_id, quantity
            FROM cart_items
            WHERE cart_id = ANY($1)
            ORDER BY cart_id, position
            "#,
        )
        .bind(cart_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch cart items", e))?;

        let mut items: HashMap<Uuid, Vec<CartItem>> = HashMap::new();
        for row in rows {
            let cart_id: Uuid = row
                .try_get("cart_id")
                .map_err(|e| db_error("read cart_items.cart_id", e))?;
            let product_id: Uuid = row
                .try_get("product_id")
                .map_err(|e| db_error("read cart_items.product_id", e))?;
            let quantity: i64 = row
                .try_get("quantity")
                .map_err(|e| db_error("read cart_items.quantity", e))?;

            let quantity = u32::try_from(quantity).map_err(|e| corrupt_row("quantity", e))?;
            let item = CartItem::new(ProductId::from_uuid(product_id), quantity)
                .map_err(|e| corrupt_row("quantity", e))?;
            items.entry(cart_id).or_default().push(item);
        }

        Ok(items)
    }

    async fn insert_items(
        tx: &mut Transaction<'_, Postgres>,
        cart: &Cart,
    ) -> Result<(), DomainError> {
        for (position, item) in cart.products().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cart_items (cart_id, product_id, quantity, position)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(cart.id().as_uuid())
            .bind(item.product_id().as_uuid())
            .bind(i64::from(item.quantity()))
            .bind(position as i32)
            .execute(&mut **tx)
            .await
            .map_err(|e| db_error("insert cart item", e))?;
        }
        Ok(())
    }
}

fn sort_column(field: &str) -> &'static str {
    match field {
        "date" => "date",
        "user_id" => "user_id",
        _ => "created_at",
    }
}

#[async_trait]
impl Repository<Cart, CartId> for PostgresCartRepository {
    async fn find_by_id(&self, id: &CartId) -> Result<Option<Cart>, DomainError> {
        let row = sqlx::query(
            "SELECT id, user_id, date, created_at, updated_at FROM carts WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch cart", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.load_items(&[*id.as_uuid()]).await?;
        let products = items.remove(id.as_uuid()).unwrap_or_default();
        row_to_cart(row, products).map(Some)
    }

    async fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO carts (id, user_id, date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(cart.id().as_uuid())
        .bind(cart.user_id().as_uuid())
        .bind(cart.date().as_datetime())
        .bind(cart.created_at().as_datetime())
        .bind(cart.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert cart", e))?;

        Self::insert_items(&mut tx, cart).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit cart", e))
    }

    async fn update(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE carts SET
                user_id = $2,
                date = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(cart.id().as_uuid())
        .bind(cart.user_id().as_uuid())
        .bind(cart.date().as_datetime())
        .bind(cart.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update cart", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CartNotFound,
                format!("Cart not found: {}", cart.id()),
            ));
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("replace cart items", e))?;

        Self::insert_items(&mut tx, cart).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit cart", e))
    }

    async fn delete(&self, id: &CartId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete cart", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CartNotFound,
                format!("Cart not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Cart>, DomainError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM carts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count carts", e))?;

        let (limit, offset) = limit_offset(request);
        let query = format!(
            "SELECT id, user_id, date, created_at, updated_at FROM carts {} LIMIT $1 OFFSET $2",
            order_by(request, sort_column)
        );
        let rows = sqlx::query(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch carts", e))?;

        let ids = rows
            .iter()
            .map(|row| row.try_get::<Uuid, _>("id"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| db_error("read carts.id", e))?;
        let mut items = self.load_items(&ids).await?;

        let carts = rows
            .into_iter()
            .zip(ids)
            .map(|(row, id)| row_to_cart(row, items.remove(&id).unwrap_or_default()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(carts, total.0.max(0) as u64, request))
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {}

fn row_to_cart(row: PgRow, products: Vec<CartItem>) -> Result<Cart, DomainError> {
    let id: Uuid = row.try_get("id").map_err(|e| db_error("read carts.id", e))?;
    let user_id: Uuid = row
        .try_get("user_id")
        .map_err(|e| db_error("read carts.user_id", e))?;
    let date: DateTime<Utc> = row.try_get("date").map_err(|e| db_error("read carts.date", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("read carts.created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("read carts.updated_at", e))?;

    Ok(Cart::reconstitute(
        CartId::from_uuid(id),
        UserId::from_uuid(user_id),
        Timestamp::from_datetime(date),
        products,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
