//! Order read path with ownership checks.

use rust_decimal::Decimal;
use thiserror::Error;

use oxcart_core::OrderId;

use super::Requester;
use crate::db::{RepositoryError, Snapshot, Store};
use crate::models::{Order, OrderItem, Product};

/// Errors from order reads.
#[derive(Debug, Error)]
pub enum OrderAccessError {
    /// No order with the given ID.
    #[error("order not found")]
    NotFound,

    /// The requester is neither the owning customer's user nor staff.
    #[error("permission denied")]
    Forbidden,

    /// Lower-level store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One purchased line joined with its product.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub item: OrderItem,
    pub product: Product,
}

impl OrderLine {
    /// Line total at the captured purchase price.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.item.unit_price * Decimal::from(self.item.quantity)
    }
}

/// An order with its lines resolved.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

impl OrderDetails {
    /// Sum of all line totals, at captured purchase prices.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(OrderLine::total_price).sum()
    }
}

/// Load an order on behalf of a requester.
///
/// The owning customer's user and staff may read an order; everyone else is
/// denied. An existing order probed by a non-owner reports `Forbidden`, not
/// `NotFound`.
///
/// # Errors
///
/// Returns `OrderAccessError::NotFound` for an unknown order and
/// `OrderAccessError::Forbidden` for an ownership failure.
pub fn get_order(
    store: &Store,
    requester: &Requester,
    order_id: OrderId,
) -> Result<OrderDetails, OrderAccessError> {
    store.read(|txn| {
        let order = txn.orders().get(order_id).ok_or(OrderAccessError::NotFound)?;

        if !requester.is_staff {
            let owner = txn.customers().get(order.customer_id).ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "order {} references missing customer {}",
                    order.id, order.customer_id
                ))
            })?;
            if owner.user_id != requester.user_id {
                return Err(OrderAccessError::Forbidden);
            }
        }

        let lines = resolve_lines(txn, &order)?;
        Ok(OrderDetails { order, lines })
    })
}

/// Join an order's items with their products.
fn resolve_lines(
    txn: &Snapshot<'_>,
    order: &Order,
) -> Result<Vec<OrderLine>, RepositoryError> {
    let mut lines = Vec::new();
    for item in txn.orders().items(order.id) {
        let product = txn.products().get(item.product_id).ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "order item {} references missing product {}",
                item.id, item.product_id
            ))
        })?;
        lines.push(OrderLine { item, product });
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use oxcart_core::UserId;

    use super::*;
    use crate::services::checkout::tests_support::place_seeded_order;

    #[test]
    fn the_owner_can_read_their_order() {
        let (store, placed) = place_seeded_order(UserId::new(1));
        let details = get_order(&store, &Requester::user(UserId::new(1)), placed.order.id)
            .expect("owner read");
        assert_eq!(details.order.id, placed.order.id);
        assert_eq!(details.total_price(), Decimal::new(2000, 2));
    }

    #[test]
    fn another_user_is_forbidden() {
        let (store, placed) = place_seeded_order(UserId::new(1));
        let result = get_order(&store, &Requester::user(UserId::new(2)), placed.order.id);
        assert!(matches!(result, Err(OrderAccessError::Forbidden)));
    }

    #[test]
    fn staff_can_read_any_order() {
        let (store, placed) = place_seeded_order(UserId::new(1));
        let details = get_order(&store, &Requester::staff(UserId::new(2)), placed.order.id)
            .expect("staff read");
        assert_eq!(details.order.id, placed.order.id);
    }

    #[test]
    fn unknown_orders_are_not_found_even_for_staff() {
        let (store, _) = place_seeded_order(UserId::new(1));
        let result = get_order(&store, &Requester::staff(UserId::new(2)), OrderId::new(999));
        assert!(matches!(result, Err(OrderAccessError::NotFound)));
    }
}
