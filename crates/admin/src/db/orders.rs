//! Read-only queries behind the admin dashboard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use kynship_core::{OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::RecentOrder;

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    customer_name: String,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for RecentOrder {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            order_number: row.order_number,
            customer_name: row.customer_name,
            total: row.total,
            status: OrderStatus::from(row.status),
            created_at: row.created_at,
        }
    }
}

/// Repository for order and product reads.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Number of products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_products(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// The `limit` most recent orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_orders(&self, limit: i64) -> Result<Vec<RecentOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, order_number, customer_name, total, status, created_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
