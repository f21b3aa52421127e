//! In-process transactional store.
//!
//! # Tables
//!
//! - `products` - catalog rows (current prices)
//! - `carts` / `cart_items` - pre-checkout state, keyed by opaque cart token
//! - `customers` - one row per user, created on first order
//! - `orders` / `order_items` - purchase history
//!
//! # Transactions
//!
//! All access goes through [`Store`]. Reads take a shared [`Snapshot`] of
//! committed state. Writes run inside a [`UnitOfWork`]: an exclusive working
//! copy of the tables that is published atomically when the transaction
//! closure returns `Ok`, and discarded untouched when it returns `Err`.
//! Writers are serialized, so two transactions racing on the same row cannot
//! both commit; the second runs against the first's committed state.
//!
//! Repository structs group the operations of one table. Their read methods
//! are available on both snapshots and units of work.

pub mod carts;
pub mod customers;
pub mod orders;
pub mod products;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use oxcart_core::{CartId, CartItemId, CustomerId, OrderId, OrderItemId, ProductId};

use crate::models::{Cart, CartItem, Customer, Order, OrderItem, Product};

pub use carts::CartRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested row was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., one customer per user).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A row references another that no longer exists.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// All rows, grouped by table.
///
/// Fields are crate-private; access goes through the repositories.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    pub(crate) products: HashMap<ProductId, Product>,
    pub(crate) carts: HashMap<CartId, Cart>,
    pub(crate) cart_items: HashMap<CartItemId, CartItem>,
    pub(crate) customers: HashMap<CustomerId, Customer>,
    pub(crate) orders: HashMap<OrderId, Order>,
    pub(crate) order_items: HashMap<OrderItemId, OrderItem>,
    pub(crate) sequences: Sequences,
}

/// Per-table sequential ID allocators.
///
/// IDs allocated in a discarded unit of work are lost; gaps are permitted,
/// reuse is not.
#[derive(Debug, Default, Clone)]
pub(crate) struct Sequences {
    product: i32,
    cart_item: i32,
    customer: i32,
    order: i32,
    order_item: i32,
}

impl Sequences {
    pub(crate) const fn next_product(&mut self) -> ProductId {
        self.product += 1;
        ProductId::new(self.product)
    }

    pub(crate) const fn next_cart_item(&mut self) -> CartItemId {
        self.cart_item += 1;
        CartItemId::new(self.cart_item)
    }

    pub(crate) const fn next_customer(&mut self) -> CustomerId {
        self.customer += 1;
        CustomerId::new(self.customer)
    }

    pub(crate) const fn next_order(&mut self) -> OrderId {
        self.order += 1;
        OrderId::new(self.order)
    }

    pub(crate) const fn next_order_item(&mut self) -> OrderItemId {
        self.order_item += 1;
        OrderItemId::new(self.order_item)
    }
}

/// Process-local transactional store.
///
/// Cheaply cloneable; all clones share the same underlying tables.
#[derive(Debug, Default, Clone)]
pub struct Store {
    inner: Arc<RwLock<Tables>>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a read-only snapshot of committed state.
    pub fn read<T>(&self, f: impl FnOnce(&Snapshot<'_>) -> T) -> T {
        let guard = self.inner.read();
        let snapshot = Snapshot { tables: &guard };
        f(&snapshot)
    }

    /// Run `f` inside an exclusive unit of work.
    ///
    /// The closure stages mutations against a working copy of the tables.
    /// Returning `Ok` publishes the copy atomically; returning `Err`
    /// discards it, leaving committed state exactly as it was.
    ///
    /// # Errors
    ///
    /// Propagates whatever error the closure returns.
    pub fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut UnitOfWork<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard = self.inner.write();
        let mut work = guard.clone();
        let result = {
            let mut uow = UnitOfWork { tables: &mut work };
            f(&mut uow)
        };
        if result.is_ok() {
            *guard = work;
        }
        result
    }

    /// Run `f` inside a unit of work that always commits.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut UnitOfWork<'_>) -> T) -> T {
        let mut guard = self.inner.write();
        let mut work = guard.clone();
        let value = {
            let mut uow = UnitOfWork { tables: &mut work };
            f(&mut uow)
        };
        *guard = work;
        value
    }
}

/// Read-only view of committed state.
pub struct Snapshot<'a> {
    tables: &'a Tables,
}

impl Snapshot<'_> {
    #[must_use]
    pub fn products(&self) -> ProductRepository<&Tables> {
        ProductRepository::new(self.tables)
    }

    #[must_use]
    pub fn carts(&self) -> CartRepository<&Tables> {
        CartRepository::new(self.tables)
    }

    #[must_use]
    pub fn customers(&self) -> CustomerRepository<&Tables> {
        CustomerRepository::new(self.tables)
    }

    #[must_use]
    pub fn orders(&self) -> OrderRepository<&Tables> {
        OrderRepository::new(self.tables)
    }
}

/// Exclusive working copy of the tables for one transaction.
pub struct UnitOfWork<'a> {
    tables: &'a mut Tables,
}

impl UnitOfWork<'_> {
    pub fn products(&mut self) -> ProductRepository<&mut Tables> {
        ProductRepository::new(&mut *self.tables)
    }

    pub fn carts(&mut self) -> CartRepository<&mut Tables> {
        CartRepository::new(&mut *self.tables)
    }

    pub fn customers(&mut self) -> CustomerRepository<&mut Tables> {
        CustomerRepository::new(&mut *self.tables)
    }

    pub fn orders(&mut self) -> OrderRepository<&mut Tables> {
        OrderRepository::new(&mut *self.tables)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn transaction_publishes_on_ok() {
        let store = Store::new();
        let product = store
            .transaction(|uow| Ok::<_, RepositoryError>(uow.products().create("Kettle", Decimal::new(2500, 2))))
            .expect("commit");

        let found = store.read(|txn| txn.products().get(product.id));
        assert_eq!(found, Some(product));
    }

    #[test]
    fn transaction_discards_on_err() {
        let store = Store::new();
        let result: Result<(), RepositoryError> = store.transaction(|uow| {
            uow.products().create("Kettle", Decimal::new(2500, 2));
            Err(RepositoryError::NotFound)
        });
        assert!(result.is_err());

        // nothing from the aborted transaction is visible
        let count = store.read(|txn| txn.products().count());
        assert_eq!(count, 0);
    }

    #[test]
    fn mutate_always_commits() {
        let store = Store::new();
        let product = store.mutate(|uow| uow.products().create("Kettle", Decimal::new(2500, 2)));
        assert!(store.read(|txn| txn.products().get(product.id)).is_some());
    }

    #[test]
    fn sequences_do_not_reuse_ids_across_aborts() {
        let store = Store::new();
        let first = store.mutate(|uow| uow.products().create("A", Decimal::ONE));
        let _: Result<(), RepositoryError> = store.transaction(|uow| {
            uow.products().create("discarded", Decimal::ONE);
            Err(RepositoryError::NotFound)
        });
        let second = store.mutate(|uow| uow.products().create("B", Decimal::ONE));

        assert_ne!(first.id, second.id);
    }
}
