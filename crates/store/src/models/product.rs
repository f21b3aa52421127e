//! Catalog product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use oxcart_core::ProductId;

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Current catalog price. Order items capture their own copy at purchase
    /// time; changing this never rewrites purchase history.
    pub unit_price: Decimal,
}
