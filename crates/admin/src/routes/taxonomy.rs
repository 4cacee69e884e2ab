//! Taxonomy handlers: categories, subcategories and lookup tables.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use safegear_core::{CategoryId, SubcategoryId};

use crate::db::taxonomy::{
    AdminCategory, AdminLookupItem, AdminSubcategory, LookupTable, TaxonomyRepository,
};
use crate::error::{AdminError, Result};
use crate::middleware::auth::{RequireAdmin, RequireWriter};
use crate::state::AppState;

fn validate_discount(discount: Decimal) -> Result<()> {
    if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&discount) {
        return Err(AdminError::BadRequest(
            "discount must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

/// Body for category create/update.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub discount: Decimal,
}

/// Body for subcategory create/update.
#[derive(Debug, Deserialize)]
pub struct SubcategoryRequest {
    pub category: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub discount: Decimal,
}

/// Body for lookup-table creation.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub name: String,
}

/// GET /api/categories
pub async fn categories(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminCategory>>> {
    let categories = TaxonomyRepository::new(state.pool()).list_categories().await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<AdminCategory>)> {
    validate_discount(body.discount)?;
    let category = TaxonomyRepository::new(state.pool())
        .create_category(&body.name, &body.slug, body.discount)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<CategoryId>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<AdminCategory>> {
    validate_discount(body.discount)?;
    let category = TaxonomyRepository::new(state.pool())
        .update_category(id, &body.name, &body.slug, body.discount)
        .await?;

    tracing::info!(category_id = %id, discount = %category.discount, "category updated");
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    TaxonomyRepository::new(state.pool()).delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters for the subcategory listing.
#[derive(Debug, Deserialize)]
pub struct SubcategoryParams {
    pub category: Option<CategoryId>,
}

/// GET /api/subcategories
pub async fn subcategories(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<SubcategoryParams>,
) -> Result<Json<Vec<AdminSubcategory>>> {
    let subcategories = TaxonomyRepository::new(state.pool())
        .list_subcategories(params.category)
        .await?;
    Ok(Json(subcategories))
}

/// POST /api/subcategories
pub async fn create_subcategory(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<SubcategoryRequest>,
) -> Result<(StatusCode, Json<AdminSubcategory>)> {
    validate_discount(body.discount)?;
    let subcategory = TaxonomyRepository::new(state.pool())
        .create_subcategory(body.category, &body.name, &body.slug, body.discount)
        .await?;

    Ok((StatusCode::CREATED, Json(subcategory)))
}

/// PUT /api/subcategories/{id}
pub async fn update_subcategory(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<SubcategoryId>,
    Json(body): Json<SubcategoryRequest>,
) -> Result<Json<AdminSubcategory>> {
    validate_discount(body.discount)?;
    let subcategory = TaxonomyRepository::new(state.pool())
        .update_subcategory(id, &body.name, &body.slug, body.discount)
        .await?;

    Ok(Json(subcategory))
}

/// DELETE /api/subcategories/{id}
pub async fn delete_subcategory(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<SubcategoryId>,
) -> Result<StatusCode> {
    TaxonomyRepository::new(state.pool())
        .delete_subcategory(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/sizes
pub async fn sizes(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminLookupItem>>> {
    list_lookup(&state, LookupTable::Sizes).await
}

/// POST /api/sizes
pub async fn create_size(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<LookupRequest>,
) -> Result<(StatusCode, Json<AdminLookupItem>)> {
    create_lookup(&state, LookupTable::Sizes, &body.name).await
}

/// DELETE /api/sizes/{id}
pub async fn delete_size(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    delete_lookup(&state, LookupTable::Sizes, id).await
}

/// GET /api/materials
pub async fn materials(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminLookupItem>>> {
    list_lookup(&state, LookupTable::Materials).await
}

/// POST /api/materials
pub async fn create_material(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<LookupRequest>,
) -> Result<(StatusCode, Json<AdminLookupItem>)> {
    create_lookup(&state, LookupTable::Materials, &body.name).await
}

/// DELETE /api/materials/{id}
pub async fn delete_material(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    delete_lookup(&state, LookupTable::Materials, id).await
}

/// GET /api/layouts
pub async fn layouts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminLookupItem>>> {
    list_lookup(&state, LookupTable::Layouts).await
}

/// POST /api/layouts
pub async fn create_layout(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<LookupRequest>,
) -> Result<(StatusCode, Json<AdminLookupItem>)> {
    create_lookup(&state, LookupTable::Layouts, &body.name).await
}

/// DELETE /api/layouts/{id}
pub async fn delete_layout(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    delete_lookup(&state, LookupTable::Layouts, id).await
}

async fn list_lookup(state: &AppState, table: LookupTable) -> Result<Json<Vec<AdminLookupItem>>> {
    let items = TaxonomyRepository::new(state.pool()).list_lookup(table).await?;
    Ok(Json(items))
}

async fn create_lookup(
    state: &AppState,
    table: LookupTable,
    name: &str,
) -> Result<(StatusCode, Json<AdminLookupItem>)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AdminError::BadRequest("name is required".to_string()));
    }

    let item = TaxonomyRepository::new(state.pool())
        .create_lookup(table, name)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn delete_lookup(state: &AppState, table: LookupTable, id: i32) -> Result<StatusCode> {
    TaxonomyRepository::new(state.pool())
        .delete_lookup(table, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
