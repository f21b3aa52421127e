//! Anonymous shopping cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oxcart_core::{CartId, CartItemId, ProductId};

/// A session-scoped basket of intended purchases.
///
/// Carts have no owner; anyone holding the opaque [`CartId`] token can edit
/// them. A cart exists only until checkout consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub created_at: DateTime<Utc>,
}

/// One (product, quantity) line within a cart.
///
/// At most one line exists per (cart, product) pair; adding the same product
/// again merges quantities instead of creating a second row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
}
