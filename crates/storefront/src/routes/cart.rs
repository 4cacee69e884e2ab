//! Cart handlers.
//!
//! Every mutation responds with the freshly aggregated cart, so the client
//! never needs a follow-up read and the stored total is already written
//! through by the time the response leaves.

use axum::{Json, extract::State};
use serde::Deserialize;

use safegear_core::ProductId;

use crate::db::cart::CartRepository;
use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::pricing::{CartView, load_cart_view};
use crate::state::AppState;

fn default_quantity() -> i32 {
    1
}

/// Body for POST /api/cart/add.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Body for POST /api/cart/update.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub product: ProductId,
    pub quantity: i32,
}

/// Body for POST /api/cart/remove.
#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub product: ProductId,
}

/// GET /api/cart
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartView>> {
    let cart = CartRepository::new(state.pool()).get_or_create(user.id).await?;
    let view = load_cart_view(state.pool(), cart).await?;
    Ok(Json(view))
}

/// POST /api/cart/add
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<AddRequest>,
) -> Result<Json<CartView>> {
    if body.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    // Reject unknown or deactivated products up front, rather than letting
    // the line land and be silently dropped at display time.
    CatalogRepository::new(state.pool())
        .get_product(body.product)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product)))?;

    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    repo.add_item(cart.id, body.product, body.quantity).await?;

    let view = load_cart_view(state.pool(), cart).await?;
    Ok(Json(view))
}

/// POST /api/cart/update
///
/// A quantity of zero (or less) removes the line.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<CartView>> {
    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    repo.set_item_quantity(cart.id, body.product, body.quantity)
        .await?;

    let view = load_cart_view(state.pool(), cart).await?;
    Ok(Json(view))
}

/// POST /api/cart/remove
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<RemoveRequest>,
) -> Result<Json<CartView>> {
    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    repo.remove_item(cart.id, body.product).await?;

    let view = load_cart_view(state.pool(), cart).await?;
    Ok(Json(view))
}
