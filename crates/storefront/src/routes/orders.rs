//! Order history handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use safegear_core::OrderId;

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::{Order, OrderItem};
use crate::state::AppState;

/// GET /api/orders
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}

/// Order detail with its snapshot lines.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub products: Vec<OrderItem>,
}

/// GET /api/orders/{id}
///
/// Scoped to the logged-in user; someone else's order is a plain 404.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    let (order, products) = OrderRepository::new(state.pool())
        .get_for_user(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(OrderDetail { order, products }))
}
