//! Checkout: convert a cart into an order.
//!
//! The whole conversion is one unit of work: resolve and validate the cart,
//! resolve or create the customer, create the order with one line per cart
//! item (capturing each product's price at this instant), and delete the
//! cart together with its items. A failure at any point leaves the cart and
//! its items untouched and no order visible.
//!
//! Two checkouts racing on the same cart are serialized by the store; the
//! one that runs second finds the cart already gone and fails validation.

use thiserror::Error;

use oxcart_core::{CartId, UserId};

use super::orders::{OrderDetails, OrderLine};
use crate::db::{RepositoryError, Store};
use crate::events::{EventSink, OrderPlaced};

/// Errors from checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No cart with the given token, or the cart has no items. The two
    /// cases are deliberately indistinguishable to the caller.
    #[error("no cart with the given id was found")]
    InvalidCart,

    /// Lower-level store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Place an order from the cart identified by `cart_id`, on behalf of the
/// authenticated user `user_id`.
///
/// On success the cart no longer exists, exactly one new order does, and an
/// [`OrderPlaced`] event has been offered to `events`. Publishing the event
/// is best-effort: a closed queue is logged and does not fail the checkout.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidCart`] if the cart is missing or empty.
/// Any error rolls the entire unit of work back.
pub fn place_order(
    store: &Store,
    user_id: UserId,
    cart_id: CartId,
    events: &impl EventSink,
) -> Result<OrderDetails, CheckoutError> {
    let placed = store.transaction(|uow| -> Result<OrderDetails, CheckoutError> {
        let cart = uow.carts().get(cart_id).ok_or(CheckoutError::InvalidCart)?;
        let items = uow.carts().items(cart.id);
        if items.is_empty() {
            return Err(CheckoutError::InvalidCart);
        }

        let customer = uow.customers().get_or_create(user_id);
        let order = uow.orders().create(customer.id);

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = uow
                .products()
                .get(item.product_id)
                .ok_or(RepositoryError::NotFound)?;
            let line =
                uow.orders()
                    .add_item(order.id, product.id, product.unit_price, item.quantity)?;
            lines.push(OrderLine {
                item: line,
                product,
            });
        }

        uow.carts().delete(cart.id)?;
        Ok(OrderDetails { order, lines })
    })?;

    if let Err(err) = events.publish(OrderPlaced {
        order_id: placed.order.id,
    }) {
        tracing::warn!(
            order_id = %placed.order.id,
            error = %err,
            "failed to enqueue order confirmation"
        );
    }

    Ok(placed)
}
