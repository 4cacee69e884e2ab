//! Order fulfilment reads and status updates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use safegear_core::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

use super::RepositoryError;

const ORDER_COLUMNS: &str = "id, user_id, status, payment_status, total_amount, currency, \
     razorpay_order_id, razorpay_payment_id, invoice_number, created_at, updated_at";

/// An order as the admin sees it.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: OrderId,
    #[serde(rename = "user")]
    pub user_id: UserId,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub currency: String,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub invoice_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A price-frozen order line.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderItem {
    #[serde(rename = "product")]
    pub product_id: Option<ProductId>,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Repository for order fulfilment.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<AdminOrder>, RepositoryError> {
        let query = format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE $1::order_status IS NULL OR status = $1
            ORDER BY created_at DESC
            "
        );
        let orders = sqlx::query_as::<_, AdminOrder>(&query)
            .bind(status)
            .fetch_all(self.pool)
            .await?;

        Ok(orders)
    }

    /// Get one order with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: OrderId,
    ) -> Result<Option<(AdminOrder, Vec<AdminOrderItem>)>, RepositoryError> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let order = sqlx::query_as::<_, AdminOrder>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, AdminOrderItem>(
            r"
            SELECT product_id, title, unit_price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some((order, items)))
    }

    /// Advance an order's fulfilment status.
    ///
    /// Transitions follow the lifecycle (created -> paid -> shipped ->
    /// delivered, cancellable until delivered); anything else is a conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist and
    /// `RepositoryError::Conflict` for an invalid transition.
    pub async fn set_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<AdminOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let current = current.ok_or(RepositoryError::NotFound)?;
        if !current.can_transition_to(next) {
            return Err(RepositoryError::Conflict(format!(
                "cannot move order from {current} to {next}"
            )));
        }

        let query = format!(
            r"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "
        );
        let order = sqlx::query_as::<_, AdminOrder>(&query)
            .bind(id)
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(order_id = %id, from = %current, to = %next, "order status updated");
        Ok(order)
    }
}
