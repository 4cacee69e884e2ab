//! Cart repository.
//!
//! Every mutation here is a single atomic SQL statement. The original
//! read-modify-write pattern loses updates when two requests race on the same
//! cart; upsert-increments and conditional deletes close that gap without
//! application-side locking.

use rust_decimal::Decimal;
use sqlx::PgPool;

use safegear_core::{CartId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem};

/// What a requested line quantity resolves to.
///
/// Non-positive quantities are never stored; they drop the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Store the new quantity.
    Set(i32),
    /// Remove the line entirely.
    Remove,
}

impl QuantityChange {
    #[must_use]
    pub const fn from_requested(quantity: i32) -> Self {
        if quantity <= 0 {
            Self::Remove
        } else {
            Self::Set(quantity)
        }
    }
}

/// Repository for cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart, creating it lazily if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(
            r"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW()
            RETURNING id, user_id, total_price, created_at, updated_at
            ",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(cart)
    }

    /// Get the user's cart without creating one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(
            r"
            SELECT id, user_id, total_price, created_at, updated_at
            FROM carts
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(cart)
    }

    /// List the cart's line items in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(
            r"
            SELECT product_id, quantity
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// If the product is already in the cart, the quantities are summed
    /// atomically, so concurrent adds both land.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including a
    /// foreign-key violation for an unknown product).
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          updated_at = NOW()
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line entirely; it is never
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_item_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let quantity = match QuantityChange::from_requested(quantity) {
            QuantityChange::Remove => return self.remove_item(cart_id, product_id).await,
            QuantityChange::Set(quantity) => quantity,
        };

        let result = sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = $3, updated_at = NOW()
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove all lines (after checkout).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Write-through the derived cart total.
    ///
    /// The total is always recomputed from line items before display; this
    /// snapshot exists so other readers of the cart row see a consistent
    /// figure.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_total(&self, cart_id: CartId, total: Decimal) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE carts
            SET total_price = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(cart_id)
        .bind(total)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantity_removes_the_line() {
        assert_eq!(QuantityChange::from_requested(0), QuantityChange::Remove);
    }

    #[test]
    fn test_negative_quantity_removes_the_line() {
        assert_eq!(QuantityChange::from_requested(-3), QuantityChange::Remove);
    }

    #[test]
    fn test_positive_quantity_is_stored_as_given() {
        assert_eq!(QuantityChange::from_requested(1), QuantityChange::Set(1));
        assert_eq!(QuantityChange::from_requested(7), QuantityChange::Set(7));
    }
}
