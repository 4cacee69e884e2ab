//! Product and price-variant catalog writes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use safegear_core::{
    CategoryId, LayoutId, MaterialId, ProductId, ProductKind, SizeId, SubcategoryId, VariantId,
};

use super::RepositoryError;

const PRODUCT_COLUMNS: &str = "id, title, description, images, mrp, sale_price, discount, kind, \
     category_id, subcategory_id, product_code, code, active, created_at, updated_at";

/// A product as the admin sees it: raw catalog fields, no derived pricing,
/// inactive rows included.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProduct {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub mrp: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    #[serde(rename = "category")]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "subcategory")]
    pub subcategory_id: Option<SubcategoryId>,
    pub product_code: String,
    pub code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A price variant row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminVariant {
    pub id: VariantId,
    #[serde(rename = "product")]
    pub product_id: ProductId,
    #[serde(rename = "layout")]
    pub layout_id: LayoutId,
    #[serde(rename = "size")]
    pub size_id: SizeId,
    #[serde(rename = "material")]
    pub material_id: MaterialId,
    pub qr: bool,
    pub price: Decimal,
}

/// Fields for creating or fully updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub mrp: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub kind: ProductKind,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub product_code: String,
    pub code: String,
}

/// One variant in a replace-variants call.
#[derive(Debug, Clone)]
pub struct VariantInput {
    pub layout_id: LayoutId,
    pub size_id: SizeId,
    pub material_id: MaterialId,
    pub qr: bool,
    pub price: Decimal,
}

/// Repository for catalog writes.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, inactive included, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<AdminProduct>, RepositoryError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC");
        let products = sqlx::query_as::<_, AdminProduct>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Get one product by ID, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<AdminProduct>, RepositoryError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, AdminProduct>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product code is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ProductInput) -> Result<AdminProduct, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO products (title, description, images, mrp, sale_price, discount,
                                  kind, category_id, subcategory_id, product_code, code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let product = sqlx::query_as::<_, AdminProduct>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.images)
            .bind(input.mrp)
            .bind(input.sale_price)
            .bind(input.discount)
            .bind(input.kind)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(&input.product_code)
            .bind(&input.code)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "product code already exists"))?;

        Ok(product)
    }

    /// Replace every mutable field of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist and
    /// `RepositoryError::Conflict` if the product code is taken.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<AdminProduct, RepositoryError> {
        let query = format!(
            r"
            UPDATE products
            SET title = $2, description = $3, images = $4, mrp = $5, sale_price = $6,
                discount = $7, kind = $8, category_id = $9, subcategory_id = $10,
                product_code = $11, code = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let product = sqlx::query_as::<_, AdminProduct>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.images)
            .bind(input.mrp)
            .bind(input.sale_price)
            .bind(input.discount)
            .bind(input.kind)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(&input.product_code)
            .bind(&input.code)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "product code already exists"))?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Activate or deactivate a product.
    ///
    /// Deactivated products disappear from the storefront; cart lines
    /// referencing them stop counting toward totals but are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn set_active(&self, id: ProductId, active: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET active = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(active)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Hard-delete a product. Variants and cart lines cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List a product's variants.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_variants(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<AdminVariant>, RepositoryError> {
        let variants = sqlx::query_as::<_, AdminVariant>(
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

    /// Replace a product's variant set in one transaction.
    ///
    /// Admin variant editing is always whole-form: the submitted set becomes
    /// the product's variants, anything absent is removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist and
    /// `RepositoryError::Conflict` on a duplicate (layout, size, material,
    /// qr) tuple.
    pub async fn replace_variants(
        &self,
        product_id: ProductId,
        variants: &[VariantInput],
    ) -> Result<Vec<AdminVariant>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM price_variants WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(variants.len());
        for variant in variants {
            let row = sqlx::query_as::<_, AdminVariant>(
                r"
                INSERT INTO price_variants (product_id, layout_id, size_id, material_id, qr, price)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, product_id, layout_id, size_id, material_id, qr, price
                ",
            )
            .bind(product_id)
            .bind(variant.layout_id)
            .bind(variant.size_id)
            .bind(variant.material_id)
            .bind(variant.qr)
            .bind(variant.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "duplicate variant attributes"))?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }
}
