//! Product listing and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use safegear_core::{CategoryId, ProductId, SubcategoryId};

use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::pricing::{
    PricedProduct, PricedVariant, attach_discounts, price_product, price_products, price_variant,
};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<CategoryId>,
    pub subcategory: Option<SubcategoryId>,
}

/// GET /api/products
///
/// Every listed product carries derived pricing; category discounts are
/// resolved once per distinct category across the whole page.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PricedProduct>>> {
    let catalog = CatalogRepository::new(state.pool());
    let products = catalog
        .list_products(params.category, params.subcategory)
        .await?;
    let priced = price_products(&products, &catalog).await?;
    Ok(Json(priced))
}

/// Product detail with its priced variants.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: PricedProduct,
    pub variants: Vec<PricedVariant>,
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>> {
    let catalog = CatalogRepository::new(state.pool());

    let product = catalog
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let contexts = attach_discounts(std::slice::from_ref(&product), &catalog).await?;
    let context = contexts.first().copied().unwrap_or_default();

    let variants = catalog
        .list_variants(product.id)
        .await?
        .iter()
        .map(|variant| price_variant(variant, &product, &context))
        .collect();

    Ok(Json(ProductDetail {
        product: price_product(&product, &context),
        variants,
    }))
}
