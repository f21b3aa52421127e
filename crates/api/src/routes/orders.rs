//! Order route handlers: checkout and order retrieval.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use oxcart_core::{CartId, OrderId, OrderItemId, PaymentStatus};
use oxcart_store::services::checkout;
use oxcart_store::services::orders::{self, OrderDetails, OrderLine};

use super::carts::ProductView;
use crate::error::{ApiError, Result};
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub cart_id: Option<CartId>,
}

/// One purchased line.
///
/// `unit_price` is the price captured at purchase time; the nested product
/// carries its current catalog price, which may since have changed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub id: OrderItemId,
    pub product: ProductView,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal,
}

impl From<OrderLine> for OrderItemView {
    fn from(line: OrderLine) -> Self {
        let total_price = line.total_price();
        Self {
            id: line.item.id,
            product: ProductView::from(line.product),
            unit_price: line.item.unit_price,
            quantity: line.item.quantity,
            total_price,
        }
    }
}

/// Order detail.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub items: Vec<OrderItemView>,
    pub total_price: Decimal,
}

impl From<OrderDetails> for OrderView {
    fn from(details: OrderDetails) -> Self {
        let total_price = details.total_price();
        Self {
            id: details.order.id,
            placed_at: details.order.placed_at,
            payment_status: details.order.payment_status,
            items: details.lines.into_iter().map(OrderItemView::from).collect(),
            total_price,
        }
    }
}

/// `POST /orders` - checkout.
#[instrument(skip(state))]
pub async fn create(
    RequireAuth(requester): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    let cart_id = request.cart_id.ok_or(ApiError::Validation {
        field: "cart_id",
        message: "This field is required.".to_owned(),
    })?;

    let placed = checkout::place_order(state.store(), requester.user_id, cart_id, state.events())?;
    Ok((StatusCode::CREATED, Json(OrderView::from(placed))))
}

/// `GET /orders/{order_id}`
#[instrument(skip(state))]
pub async fn show(
    RequireAuth(requester): RequireAuth,
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderView>> {
    let details = orders::get_order(state.store(), &requester, order_id)?;
    Ok(Json(OrderView::from(details)))
}
