//! Order row types.
//!
//! Orders freeze prices at checkout time; unlike carts they are never
//! re-priced from the live catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use safegear_core::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

/// An order created at checkout.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
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
pub struct OrderItem {
    #[serde(rename = "product")]
    pub product_id: Option<ProductId>,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}
