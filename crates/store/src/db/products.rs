//! Product repository.

use std::borrow::Borrow;

use rust_decimal::Decimal;

use oxcart_core::ProductId;

use super::{RepositoryError, Tables};
use crate::models::Product;

/// Repository for catalog products.
pub struct ProductRepository<T> {
    tables: T,
}

impl<T> ProductRepository<T> {
    pub(crate) const fn new(tables: T) -> Self {
        Self { tables }
    }
}

impl<T: Borrow<Tables>> ProductRepository<T> {
    fn view(&self) -> &Tables {
        self.tables.borrow()
    }

    /// Get a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.view().products.get(&id).cloned()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn count(&self) -> usize {
        self.view().products.len()
    }
}

impl<'a> ProductRepository<&'a mut Tables> {
    /// Create a product with the given title and current unit price.
    pub fn create(&mut self, title: impl Into<String>, unit_price: Decimal) -> Product {
        let id = self.tables.sequences.next_product();
        let product = Product {
            id,
            title: title.into(),
            unit_price,
        };
        self.tables.products.insert(id, product.clone());
        product
    }

    /// Change a product's current price.
    ///
    /// Existing order items keep the price captured when they were created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub fn set_price(&mut self, id: ProductId, unit_price: Decimal) -> Result<(), RepositoryError> {
        let product = self
            .tables
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        product.unit_price = unit_price;
        Ok(())
    }

    /// Remove a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub fn delete(&mut self, id: ProductId) -> Result<(), RepositoryError> {
        self.tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Store;

    use super::*;

    #[test]
    fn set_price_changes_current_price_only() {
        let store = Store::new();
        let product = store.mutate(|uow| uow.products().create("Teapot", Decimal::new(1000, 2)));

        store
            .transaction(|uow| uow.products().set_price(product.id, Decimal::new(2000, 2)))
            .expect("price update");

        let current = store.read(|txn| txn.products().get(product.id)).expect("product");
        assert_eq!(current.unit_price, Decimal::new(2000, 2));
    }

    #[test]
    fn set_price_on_unknown_product_fails() {
        let store = Store::new();
        let result = store.transaction(|uow| uow.products().set_price(ProductId::new(99), Decimal::ONE));
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
