//! Order repository.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use safegear_core::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

/// A price-frozen line captured at checkout time.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Repository for order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its snapshot lines in one transaction.
    ///
    /// The gateway order id is part of the insert, so a `created` order row
    /// never exists without one; a failed line insert rolls the whole order
    /// back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// written on failure.
    pub async fn create(
        &self,
        user_id: UserId,
        total_amount: Decimal,
        currency: &str,
        razorpay_order_id: &str,
        lines: &[OrderLine],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO orders (user_id, total_amount, currency, razorpay_order_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, status, payment_status, total_amount, currency,
                      razorpay_order_id, razorpay_payment_id, invoice_number,
                      created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(total_amount)
        .bind(currency)
        .bind(razorpay_order_id)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, title, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.title)
            .bind(line.unit_price)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// Look up an order by its gateway order id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_razorpay_order(
        &self,
        razorpay_order_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, status, payment_status, total_amount, currency,
                   razorpay_order_id, razorpay_payment_id, invoice_number,
                   created_at, updated_at
            FROM orders
            WHERE razorpay_order_id = $1
            ",
        )
        .bind(razorpay_order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Mark an order paid after signature verification and issue its invoice
    /// number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_paid(
        &self,
        order_id: OrderId,
        razorpay_payment_id: &str,
    ) -> Result<Order, RepositoryError> {
        let invoice_number = self.next_invoice_number().await?;

        let order = sqlx::query_as::<_, Order>(
            r"
            UPDATE orders
            SET status = $2, payment_status = $3, razorpay_payment_id = $4,
                invoice_number = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, status, payment_status, total_amount, currency,
                      razorpay_order_id, razorpay_payment_id, invoice_number,
                      created_at, updated_at
            ",
        )
        .bind(order_id)
        .bind(OrderStatus::Paid)
        .bind(PaymentStatus::Paid)
        .bind(razorpay_payment_id)
        .bind(&invoice_number)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, status, payment_status, total_amount, currency,
                   razorpay_order_id, razorpay_payment_id, invoice_number,
                   created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get one of the user's orders with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, status, payment_status, total_amount, currency,
                   razorpay_order_id, razorpay_payment_id, invoice_number,
                   created_at, updated_at
            FROM orders
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = self.items(order.id).await?;
        Ok(Some((order, items)))
    }

    /// List an order's snapshot lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT product_id, title, unit_price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Allocate the next invoice number: `SG-<year>-<seq>`.
    async fn next_invoice_number(&self) -> Result<String, RepositoryError> {
        let seq: i64 = sqlx::query_scalar("SELECT nextval('invoice_number_seq')")
            .fetch_one(self.pool)
            .await?;

        Ok(format!("SG-{}-{seq:06}", Utc::now().year()))
    }
}
