//! Order fulfilment handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use safegear_core::{OrderId, OrderStatus};

use crate::db::orders::{AdminOrder, AdminOrderItem, OrderRepository};
use crate::error::{AdminError, Result};
use crate::middleware::auth::{RequireAdmin, RequireWriter};
use crate::state::AppState;

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<OrderStatus>,
}

/// GET /api/orders
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<AdminOrder>>> {
    let orders = OrderRepository::new(state.pool()).list(params.status).await?;
    Ok(Json(orders))
}

/// Order detail with its snapshot lines.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: AdminOrder,
    pub products: Vec<AdminOrderItem>,
}

/// GET /api/orders/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    let (order, products) = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("order {id}")))?;

    Ok(Json(OrderDetail { order, products }))
}

/// Body for POST /api/orders/{id}/status.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// POST /api/orders/{id}/status
///
/// Invalid lifecycle transitions come back as 409.
pub async fn set_status(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<OrderId>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<AdminOrder>> {
    let order = OrderRepository::new(state.pool())
        .set_status(id, body.status)
        .await?;

    Ok(Json(order))
}
