//! Catalog read repository.
//!
//! The storefront never writes the catalog; products, variants and taxonomy
//! are maintained by the admin binary. Only active products are visible here.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;

use safegear_core::{CategoryId, ProductId, SubcategoryId};

use super::RepositoryError;
use crate::models::{Category, LookupItem, PriceVariant, Product, Subcategory};
use crate::pricing::DiscountSource;

/// Columns fetched for cart-line products. Downstream pricing derivation
/// depends on every one of these being present, so the set is fixed.
const PRODUCT_COLUMNS: &str = "id, title, description, images, mrp, sale_price, discount, kind, \
     category_id, subcategory_id, product_code, code, active, created_at, updated_at";

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active products, optionally filtered by category or subcategory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(
        &self,
        category: Option<CategoryId>,
        subcategory: Option<SubcategoryId>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let query = format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE active
              AND ($1::INT IS NULL OR category_id = $1)
              AND ($2::INT IS NULL OR subcategory_id = $2)
            ORDER BY created_at DESC
            "
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(category)
            .bind(subcategory)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Get one active product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND active");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// Fetch active products by ID, keyed for line resolution.
    ///
    /// Products that were deleted or deactivated since being referenced are
    /// simply absent from the map; callers decide how to degrade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let query =
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1) AND active");
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(&raw_ids)
            .fetch_all(self.pool)
            .await?;

        Ok(products.into_iter().map(|p| (p.id, p)).collect())
    }

    /// List the price variants of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_variants(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<PriceVariant>, RepositoryError> {
        let variants = sqlx::query_as::<_, PriceVariant>(
            r"
            SELECT id, product_id, layout_id, size_id, material_id, qr, price
            FROM price_variants
            WHERE product_id = $1
            ORDER BY id
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(variants)
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, discount FROM categories ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// List subcategories, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_subcategories(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Subcategory>, RepositoryError> {
        let subcategories = sqlx::query_as::<_, Subcategory>(
            r"
            SELECT id, category_id, name, slug, discount
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

    /// List a lookup table (sizes, materials or layouts).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_lookup(&self, table: LookupTable) -> Result<Vec<LookupItem>, RepositoryError> {
        let query = format!("SELECT id, name FROM {} ORDER BY name", table.table_name());
        let items = sqlx::query_as::<_, LookupItem>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(items)
    }
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

impl DiscountSource for CatalogRepository<'_> {
    type Error = RepositoryError;

    /// One query per batch: `O(distinct categories)`, not `O(items)`.
    async fn category_discounts(
        &self,
        ids: &[CategoryId],
    ) -> Result<HashMap<CategoryId, Decimal>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let rows = sqlx::query_as::<_, (CategoryId, Decimal)>(
            "SELECT id, discount FROM categories WHERE id = ANY($1)",
        )
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn subcategory_discounts(
        &self,
        ids: &[SubcategoryId],
    ) -> Result<HashMap<SubcategoryId, Decimal>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let rows = sqlx::query_as::<_, (SubcategoryId, Decimal)>(
            "SELECT id, discount FROM subcategories WHERE id = ANY($1)",
        )
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
