//! Checkout handlers.
//!
//! Checkout snapshots the live-priced cart into an order, creates the
//! matching Razorpay order, and later verifies the payment callback
//! signature before marking anything paid. The cart is only cleared once a
//! payment verifies.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use safegear_core::{OrderId, PaymentStatus};

use crate::db::cart::CartRepository;
use crate::db::orders::{OrderLine, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::Order;
use crate::pricing::load_cart_view;
use crate::state::AppState;

/// Response to POST /api/checkout: everything the client-side Razorpay
/// widget needs to open.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub razorpay_order_id: String,
    /// Amount in paise, as the widget expects.
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

/// POST /api/checkout
///
/// Creates the order from the current cart at current prices.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CheckoutResponse>> {
    let cart_repo = CartRepository::new(state.pool());
    let cart = cart_repo
        .get_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("cart is empty".to_string()))?;

    let view = load_cart_view(state.pool(), cart).await?;
    if view.products.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let lines: Vec<OrderLine> = view
        .products
        .iter()
        .map(|line| OrderLine {
            product_id: line.product.id,
            title: line.product.title.clone(),
            unit_price: line.product.price,
            quantity: line.quantity,
        })
        .collect();

    // Gateway first: if Razorpay rejects the order nothing local has been
    // written, so a failed checkout can simply be retried. Unpaid gateway
    // orders expire on their own.
    let currency = &state.config().razorpay.currency;
    let gateway_order = state
        .razorpay()
        .create_order(view.total_price, &format!("cart-{}", view.id))
        .await?;

    let order = OrderRepository::new(state.pool())
        .create(user.id, view.total_price, currency, &gateway_order.id, &lines)
        .await?;

    tracing::info!(
        order_id = %order.id,
        razorpay_order_id = %gateway_order.id,
        amount = gateway_order.amount,
        "checkout order created"
    );

    Ok(Json(CheckoutResponse {
        order_id: order.id,
        razorpay_order_id: gateway_order.id,
        amount: gateway_order.amount,
        currency: gateway_order.currency,
        key_id: state.config().razorpay.key_id.clone(),
    }))
}

/// Body for POST /api/checkout/verify, as posted back by the Razorpay
/// widget.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// POST /api/checkout/verify
///
/// Verifies the callback signature, marks the order paid with its invoice
/// number, and clears the cart. Re-verifying an already-paid order is a
/// no-op returning the same order.
pub async fn verify(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<Order>> {
    if !state.razorpay().verify_signature(
        &body.razorpay_order_id,
        &body.razorpay_payment_id,
        &body.razorpay_signature,
    ) {
        tracing::warn!(
            razorpay_order_id = %body.razorpay_order_id,
            "payment signature verification failed"
        );
        return Err(AppError::BadRequest(
            "payment signature verification failed".to_string(),
        ));
    }

    let order_repo = OrderRepository::new(state.pool());
    let order = order_repo
        .get_by_razorpay_order(&body.razorpay_order_id)
        .await?
        .filter(|order| order.user_id == user.id)
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;

    if order.payment_status == PaymentStatus::Paid {
        return Ok(Json(order));
    }

    let order = order_repo
        .mark_paid(order.id, &body.razorpay_payment_id)
        .await?;

    // Payment landed, cart is spent.
    let cart_repo = CartRepository::new(state.pool());
    if let Some(cart) = cart_repo.get_by_user(user.id).await? {
        cart_repo.clear(cart.id).await?;
        cart_repo.set_total(cart.id, Decimal::ZERO).await?;
    }

    tracing::info!(
        order_id = %order.id,
        invoice_number = order.invoice_number.as_deref().unwrap_or(""),
        amount = order.total_amount.to_f64().unwrap_or_default(),
        "payment verified"
    );

    Ok(Json(order))
}
