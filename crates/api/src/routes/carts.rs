//! Cart route handlers.
//!
//! Carts are anonymous: no authentication is required, and holding the
//! opaque cart token is what grants access.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use oxcart_core::{CartId, CartItemId, ProductId};
use oxcart_store::models::{Cart, CartItem, Product};
use oxcart_store::services::carts;

use crate::error::{ApiError, Result};
use crate::state::AppState;

const REQUIRED: &str = "This field is required.";

/// Product data nested in cart and order lines.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub unit_price: Decimal,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            unit_price: product.unit_price,
        }
    }
}

/// One cart line, priced at the product's current price.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: CartItemId,
    pub product: ProductView,
    pub quantity: u32,
    pub total_price: Decimal,
}

impl From<carts::CartLine> for CartItemView {
    fn from(line: carts::CartLine) -> Self {
        let total_price = line.total_price();
        Self {
            id: line.item.id,
            product: ProductView::from(line.product),
            quantity: line.item.quantity,
            total_price,
        }
    }
}

/// Cart with resolved lines and totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub id: CartId,
    pub items: Vec<CartItemView>,
    pub total_price: Decimal,
}

impl CartView {
    fn empty(cart: &Cart) -> Self {
        Self {
            id: cart.id,
            items: Vec::new(),
            total_price: Decimal::ZERO,
        }
    }
}

impl From<carts::CartContents> for CartView {
    fn from(contents: carts::CartContents) -> Self {
        let total_price = contents.total_price();
        Self {
            id: contents.cart.id,
            items: contents.lines.into_iter().map(CartItemView::from).collect(),
            total_price,
        }
    }
}

/// Cart line as returned by the add/update operations.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemRowView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl From<CartItem> for CartItemRowView {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: Option<ProductId>,
    pub quantity: Option<u32>,
}

/// Quantity-update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: Option<u32>,
}

/// `POST /carts`
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> impl IntoResponse {
    let cart = carts::create_cart(state.store());
    (StatusCode::CREATED, Json(CartView::empty(&cart)))
}

/// `GET /carts/{cart_id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> Result<Json<CartView>> {
    let contents = carts::cart_contents(state.store(), cart_id)?;
    Ok(Json(CartView::from(contents)))
}

/// `POST /carts/{cart_id}/items`
#[instrument(skip(state))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
    Json(request): Json<AddItemRequest>,
) -> Result<impl IntoResponse> {
    let product_id = request.product_id.ok_or(ApiError::Validation {
        field: "product_id",
        message: REQUIRED.to_owned(),
    })?;
    let quantity = request.quantity.ok_or(ApiError::Validation {
        field: "quantity",
        message: REQUIRED.to_owned(),
    })?;

    let item = carts::add_item(state.store(), cart_id, product_id, quantity)?;
    Ok((StatusCode::CREATED, Json(CartItemRowView::from(item))))
}

/// `PATCH /carts/{cart_id}/items/{item_id}`
#[instrument(skip(state))]
pub async fn update_item(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(CartId, CartItemId)>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartItemRowView>> {
    let quantity = request.quantity.ok_or(ApiError::Validation {
        field: "quantity",
        message: REQUIRED.to_owned(),
    })?;

    let item = carts::update_item(state.store(), cart_id, item_id, quantity)?;
    Ok(Json(CartItemRowView::from(item)))
}

/// `DELETE /carts/{cart_id}/items/{item_id}`
#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(CartId, CartItemId)>,
) -> Result<StatusCode> {
    carts::remove_item(state.store(), cart_id, item_id)?;
    Ok(StatusCode::NO_CONTENT)
}
