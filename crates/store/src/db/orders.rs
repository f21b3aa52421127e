//! Order repository.
//!
//! Orders and their items are append-only: nothing in this module mutates a
//! row after it is created, and no delete operation exists.

use std::borrow::Borrow;

use chrono::Utc;
use rust_decimal::Decimal;

use oxcart_core::{CustomerId, OrderId, PaymentStatus, ProductId};

use super::{RepositoryError, Tables};
use crate::models::{Order, OrderItem};

/// Repository for orders and their line items.
pub struct OrderRepository<T> {
    tables: T,
}

impl<T> OrderRepository<T> {
    pub(crate) const fn new(tables: T) -> Self {
        Self { tables }
    }
}

impl<T: Borrow<Tables>> OrderRepository<T> {
    fn view(&self) -> &Tables {
        self.tables.borrow()
    }

    /// Get an order by ID.
    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<Order> {
        self.view().orders.get(&id).cloned()
    }

    /// All line items of an order, in insertion order.
    #[must_use]
    pub fn items(&self, order_id: OrderId) -> Vec<OrderItem> {
        let mut items: Vec<OrderItem> = self
            .view()
            .order_items
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id.as_i32());
        items
    }

    /// Number of orders placed so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.view().orders.len()
    }
}

impl<'a> OrderRepository<&'a mut Tables> {
    /// Create a new order for a customer, with payment pending.
    pub fn create(&mut self, customer_id: CustomerId) -> Order {
        let id = self.tables.sequences.next_order();
        let order = Order {
            id,
            customer_id,
            placed_at: Utc::now(),
            payment_status: PaymentStatus::Pending,
        };
        self.tables.orders.insert(id, order.clone());
        order
    }

    /// Append a line item to an order.
    ///
    /// `unit_price` is the caller-captured snapshot of the product's price
    /// at purchase time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub fn add_item(
        &mut self,
        order_id: OrderId,
        product_id: ProductId,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<OrderItem, RepositoryError> {
        if !self.tables.orders.contains_key(&order_id) {
            return Err(RepositoryError::NotFound);
        }

        let id = self.tables.sequences.next_order_item();
        let item = OrderItem {
            id,
            order_id,
            product_id,
            unit_price,
            quantity,
        };
        self.tables.order_items.insert(id, item.clone());
        Ok(item)
    }
}
