//! Cart row types.
//!
//! `Cart::total_price` is a write-through snapshot of the derived total; the
//! aggregator in [`crate::pricing`] recomputes it from line items on every
//! read and mutation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use safegear_core::{CartId, ProductId, UserId};

/// A user's cart.
#[derive(Debug, Clone, FromRow)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line item: a product reference and a quantity >= 1.
///
/// Lines with quantity <= 0 are deleted, never stored.
#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: i32,
}
