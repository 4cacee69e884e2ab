//! Product catalog handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use safegear_core::{
    CategoryId, LayoutId, MaterialId, ProductId, ProductKind, SizeId, SubcategoryId,
};

use crate::db::products::{
    AdminProduct, AdminVariant, ProductInput, ProductRepository, VariantInput,
};
use crate::error::{AdminError, Result};
use crate::middleware::auth::{RequireAdmin, RequireWriter};
use crate::state::AppState;

/// Body for creating or fully updating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub mrp: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    #[serde(rename = "type", default)]
    pub kind: ProductKind,
    pub category: Option<CategoryId>,
    pub subcategory: Option<SubcategoryId>,
    pub product_code: String,
    pub code: String,
}

impl ProductRequest {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AdminError::BadRequest("title is required".to_string()));
        }
        if self.product_code.trim().is_empty() {
            return Err(AdminError::BadRequest(
                "product code is required".to_string(),
            ));
        }
        for value in [self.mrp, self.sale_price].into_iter().flatten() {
            if value < Decimal::ZERO {
                return Err(AdminError::BadRequest(
                    "prices cannot be negative".to_string(),
                ));
            }
        }
        if let Some(discount) = self.discount
            && !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&discount)
        {
            return Err(AdminError::BadRequest(
                "discount must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }

    fn into_input(self) -> ProductInput {
        ProductInput {
            title: self.title,
            description: self.description,
            images: self.images,
            mrp: self.mrp,
            sale_price: self.sale_price,
            discount: self.discount,
            kind: self.kind,
            category_id: self.category,
            subcategory_id: self.subcategory,
            product_code: self.product_code,
            code: self.code,
        }
    }
}

/// GET /api/products
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminProduct>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Product detail with its variants.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: AdminProduct,
    pub variants: Vec<AdminVariant>,
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("product {id}")))?;
    let variants = repo.list_variants(id).await?;

    Ok(Json(ProductDetail { product, variants }))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<ProductRequest>,
) -> Result<(StatusCode, Json<AdminProduct>)> {
    body.validate()?;
    let product = ProductRepository::new(state.pool())
        .create(&body.into_input())
        .await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<AdminProduct>> {
    body.validate()?;
    let product = ProductRepository::new(state.pool())
        .update(id, &body.into_input())
        .await?;

    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn destroy(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Body for POST /api/products/{id}/active.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// POST /api/products/{id}/active
pub async fn set_active(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<ProductId>,
    Json(body): Json<SetActiveRequest>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .set_active(id, body.active)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One variant in a replace-variants request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRequest {
    pub layout: LayoutId,
    pub size: SizeId,
    pub material: MaterialId,
    #[serde(default)]
    pub qr: bool,
    pub price: Decimal,
}

/// PUT /api/products/{id}/variants
pub async fn replace_variants(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<ProductId>,
    Json(body): Json<Vec<VariantRequest>>,
) -> Result<Json<Vec<AdminVariant>>> {
    if body.iter().any(|v| v.price < Decimal::ZERO) {
        return Err(AdminError::BadRequest(
            "variant prices cannot be negative".to_string(),
        ));
    }

    let inputs: Vec<VariantInput> = body
        .into_iter()
        .map(|v| VariantInput {
            layout_id: v.layout,
            size_id: v.size,
            material_id: v.material,
            qr: v.qr,
            price: v.price,
        })
        .collect();

    let variants = ProductRepository::new(state.pool())
        .replace_variants(id, &inputs)
        .await?;

    Ok(Json(variants))
}
