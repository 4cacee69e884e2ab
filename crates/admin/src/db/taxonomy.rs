//! Category, subcategory and lookup-table writes.
//!
//! Category and subcategory discounts set here feed straight into storefront
//! price derivation; there is no cache between the two binaries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use safegear_core::{CategoryId, SubcategoryId};

use super::RepositoryError;

/// A category with its configured discount.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCategory {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub discount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A subcategory with its configured discount.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSubcategory {
    pub id: SubcategoryId,
    #[serde(rename = "category")]
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub discount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named lookup row (size, material or layout).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminLookupItem {
    pub id: i32,
    pub name: String,
}

/// The three product-attribute lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    Sizes,
    Materials,
    Layouts,
}

impl LookupTable {
    const fn table_name(self) -> &'static str {
        match self {
            Self::Sizes => "sizes",
            Self::Materials => "materials",
            Self::Layouts => "layouts",
        }
    }
}

/// Repository for taxonomy writes.
pub struct TaxonomyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TaxonomyRepository<'a> {
    /// Create a new taxonomy repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<AdminCategory>, RepositoryError> {
        let categories = sqlx::query_as::<_, AdminCategory>(
            "SELECT id, name, slug, discount, created_at, updated_at FROM categories ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate name or slug.
    pub async fn create_category(
        &self,
        name: &str,
        slug: &str,
        discount: Decimal,
    ) -> Result<AdminCategory, RepositoryError> {
        let category = sqlx::query_as::<_, AdminCategory>(
            r"
            INSERT INTO categories (name, slug, discount)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, discount, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(discount)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category name or slug already exists"))?;

        Ok(category)
    }

    /// Update a category, including its discount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    pub async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        slug: &str,
        discount: Decimal,
    ) -> Result<AdminCategory, RepositoryError> {
        let category = sqlx::query_as::<_, AdminCategory>(
            r"
            UPDATE categories
            SET name = $2, slug = $3, discount = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, discount, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(discount)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category name or slug already exists"))?;

        category.ok_or(RepositoryError::NotFound)
    }

    /// Delete a category. Subcategories cascade; products keep a null
    /// category reference and fall back to a zero category discount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List subcategories, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_subcategories(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<AdminSubcategory>, RepositoryError> {
        let subcategories = sqlx::query_as::<_, AdminSubcategory>(
            r"
            SELECT id, category_id, name, slug, discount, created_at, updated_at
            FROM subcategories
            WHERE $1::INT IS NULL OR category_id = $1
            ORDER BY name
            ",
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(subcategories)
    }

    /// Create a subcategory under a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate name within the
    /// category or a duplicate slug.
    pub async fn create_subcategory(
        &self,
        category_id: CategoryId,
        name: &str,
        slug: &str,
        discount: Decimal,
    ) -> Result<AdminSubcategory, RepositoryError> {
        let subcategory = sqlx::query_as::<_, AdminSubcategory>(
            r"
            INSERT INTO subcategories (category_id, name, slug, discount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, category_id, name, slug, discount, created_at, updated_at
            ",
        )
        .bind(category_id)
        .bind(name)
        .bind(slug)
        .bind(discount)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "subcategory name or slug already exists"))?;

        Ok(subcategory)
    }

    /// Update a subcategory, including its discount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subcategory doesn't exist.
    pub async fn update_subcategory(
        &self,
        id: SubcategoryId,
        name: &str,
        slug: &str,
        discount: Decimal,
    ) -> Result<AdminSubcategory, RepositoryError> {
        let subcategory = sqlx::query_as::<_, AdminSubcategory>(
            r"
            UPDATE subcategories
            SET name = $2, slug = $3, discount = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, category_id, name, slug, discount, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(discount)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "subcategory name or slug already exists"))?;

        subcategory.ok_or(RepositoryError::NotFound)
    }

    /// Delete a subcategory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subcategory doesn't exist.
    pub async fn delete_subcategory(&self, id: SubcategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List a lookup table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_lookup(
        &self,
        table: LookupTable,
    ) -> Result<Vec<AdminLookupItem>, RepositoryError> {
        let query = format!("SELECT id, name FROM {} ORDER BY name", table.table_name());
        let items = sqlx::query_as::<_, AdminLookupItem>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(items)
    }

    /// Add a lookup entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate name.
    pub async fn create_lookup(
        &self,
        table: LookupTable,
        name: &str,
    ) -> Result<AdminLookupItem, RepositoryError> {
        let query = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name",
            table.table_name()
        );
        let item = sqlx::query_as::<_, AdminLookupItem>(&query)
            .bind(name)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "name already exists"))?;

        Ok(item)
    }

    /// Delete a lookup entry.
    ///
    /// Fails with a foreign-key violation if any price variant still
    /// references it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry doesn't exist.
    pub async fn delete_lookup(&self, table: LookupTable, id: i32) -> Result<(), RepositoryError> {
        let query = format!("DELETE FROM {} WHERE id = $1", table.table_name());
        let result = sqlx::query(&query).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
