//! Category, subcategory and lookup-table handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use safegear_core::CategoryId;

use crate::db::catalog::{CatalogRepository, LookupTable};
use crate::error::Result;
use crate::models::{Category, LookupItem, Subcategory};
use crate::state::AppState;

/// GET /api/categories
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool()).list_categories().await?;
    Ok(Json(categories))
}

/// Query parameters for the subcategory listing.
#[derive(Debug, Deserialize)]
pub struct SubcategoryParams {
    pub category: Option<CategoryId>,
}

/// GET /api/subcategories
pub async fn subcategories(
    State(state): State<AppState>,
    Query(params): Query<SubcategoryParams>,
) -> Result<Json<Vec<Subcategory>>> {
    let subcategories = CatalogRepository::new(state.pool())
        .list_subcategories(params.category)
        .await?;
    Ok(Json(subcategories))
}

/// GET /api/sizes
pub async fn sizes(State(state): State<AppState>) -> Result<Json<Vec<LookupItem>>> {
    lookup(&state, LookupTable::Sizes).await
}

/// GET /api/materials
pub async fn materials(State(state): State<AppState>) -> Result<Json<Vec<LookupItem>>> {
    lookup(&state, LookupTable::Materials).await
}

/// GET /api/layouts
pub async fn layouts(State(state): State<AppState>) -> Result<Json<Vec<LookupItem>>> {
    lookup(&state, LookupTable::Layouts).await
}

async fn lookup(state: &AppState, table: LookupTable) -> Result<Json<Vec<LookupItem>>> {
    let items = CatalogRepository::new(state.pool()).list_lookup(table).await?;
    Ok(Json(items))
}
