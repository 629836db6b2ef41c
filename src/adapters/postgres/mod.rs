//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresUserRepository` - Accounts, unique by email
//! - `PostgresProductRepository` - Catalog
//! - `PostgresCartRepository` - Carts with their product lines
//! - `PostgresSaleRepository` - Sales with their priced items
//!
//! Money columns hold integer cents (`BIGINT`).

mod cart_repository;
mod product_repository;
mod sale_repository;
mod user_repository;

pub use cart_repository::PostgresCartRepository;
pub use product_repository::PostgresProductRepository;
pub use sale_repository::PostgresSaleRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode, PageRequest};

/// Opens a connection pool sized by the database configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// Error for a stored value that no longer passes domain validation.
fn corrupt_row(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid value in column '{}': {}", column, e),
    )
}

/// True when `e` violates the named unique constraint.
fn violates(e: &sqlx::Error, constraint: &str) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation() && db.constraint() == Some(constraint))
        .unwrap_or(false)
}

/// Builds an `ORDER BY` clause from whitelisted sort keys.
///
/// `column` maps a sortable field name to its column. Rows fall back to
/// creation order, with the id as the final tiebreaker.
fn order_by(request: &PageRequest, column: impl Fn(&str) -> &'static str) -> String {
    let mut clauses: Vec<String> = request
        .order
        .iter()
        .map(|key| format!("{} {}", column(key.field), key.direction.as_sql()))
        .collect();
    clauses.push("created_at ASC".to_string());
    clauses.push("id ASC".to_string());
    format!("ORDER BY {}", clauses.join(", "))
}

fn limit_offset(request: &PageRequest) -> (i64, i64) {
    (
        i64::try_from(request.limit()).unwrap_or(i64::MAX),
        i64::try_from(request.offset()).unwrap_or(i64::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_maps_fields_and_appends_tiebreakers() {
        let request =
            PageRequest::parse(None, None, Some("price desc, title"), &["price", "title"]).unwrap();
        let clause = order_by(&request, |field| match field {
            "price" => "price_cents",
            _ => "title",
        });
        assert_eq!(
            clause,
            "ORDER BY price_cents DESC, title ASC, created_at ASC, id ASC"
        );
    }

    #[test]
    fn order_by_defaults_to_creation_order() {
        let clause = order_by(&PageRequest::first(), |_| "unused");
        assert_eq!(clause, "ORDER BY created_at ASC, id ASC");
    }

    #[test]
    fn limit_offset_follows_page() {
        let request = PageRequest::parse(Some(3), Some(20), None, &[]).unwrap();
        assert_eq!(limit_offset(&request), (20, 40));
    }
}
