//! Catalog row types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use safegear_core::pricing::PricingInput;
use safegear_core::{
    CategoryId, LayoutId, MaterialId, ProductId, ProductKind, SizeId, SubcategoryId, VariantId,
};

/// A product as stored in the catalog.
///
/// Pricing fields are all optional: the pricing deriver treats a missing MRP
/// as zero rather than failing the listing.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: ProductId,
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
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The product's own pricing attributes, ready for derivation.
    #[must_use]
    pub const fn pricing_input(&self) -> PricingInput {
        PricingInput {
            mrp: self.mrp,
            sale_price: self.sale_price,
            discount_percent: self.discount,
        }
    }
}

/// A price variant: one (layout, size, material, qr) tuple of a product.
#[derive(Debug, Clone, FromRow)]
pub struct PriceVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub layout_id: LayoutId,
    pub size_id: SizeId,
    pub material_id: MaterialId,
    pub qr: bool,
    pub price: Decimal,
}

impl PriceVariant {
    /// Variant pricing input: the variant's own price plays the MRP role;
    /// explicit discounts come from the owning product.
    #[must_use]
    pub const fn pricing_input(&self, product: &Product) -> PricingInput {
        PricingInput {
            mrp: Some(self.price),
            sale_price: None,
            discount_percent: product.discount,
        }
    }
}

/// A product category with its configured discount percentage.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub discount: Decimal,
}

/// A subcategory, belonging to one category, with its own discount.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    #[serde(rename = "category")]
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub discount: Decimal,
}

/// A named lookup row (size, material or layout).
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct LookupItem {
    pub id: i32,
    pub name: String,
}
