//! HTTP route handlers for the order service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                             - Health check
//!
//! # Carts (anonymous; the cart token is the only credential)
//! POST   /carts                            - Create an empty cart
//! GET    /carts/{cart_id}                  - Cart with items and totals
//! POST   /carts/{cart_id}/items            - Add a product (merges quantities)
//! PATCH  /carts/{cart_id}/items/{item_id}  - Change a line's quantity
//! DELETE /carts/{cart_id}/items/{item_id}  - Remove a line
//!
//! # Orders (require authentication)
//! POST /orders                             - Checkout: convert a cart into an order
//! GET  /orders/{order_id}                  - Order detail (owner or staff only)
//! ```

pub mod carts;
pub mod orders;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/carts", post(carts::create))
        .route("/carts/{cart_id}", get(carts::show))
        .route("/carts/{cart_id}/items", post(carts::add_item))
        .route(
            "/carts/{cart_id}/items/{item_id}",
            patch(carts::update_item).delete(carts::remove_item),
        )
        .route("/orders", post(orders::create))
        .route("/orders/{order_id}", get(orders::show))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}
