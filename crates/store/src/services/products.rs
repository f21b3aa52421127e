//! Minimal catalog support.
//!
//! The catalog proper (search, collections, media) lives elsewhere; the
//! order service only needs to seed products and adjust current prices.

use rust_decimal::Decimal;

use oxcart_core::ProductId;

use crate::db::{RepositoryError, Store};
use crate::models::Product;

/// Add a product to the catalog.
pub fn create_product(store: &Store, title: impl Into<String>, unit_price: Decimal) -> Product {
    let title = title.into();
    store.mutate(|uow| uow.products().create(title, unit_price))
}

/// Get a product by ID.
#[must_use]
pub fn get_product(store: &Store, id: ProductId) -> Option<Product> {
    store.read(|txn| txn.products().get(id))
}

/// Change a product's current price.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such product exists.
pub fn set_price(store: &Store, id: ProductId, unit_price: Decimal) -> Result<(), RepositoryError> {
    store.transaction(|uow| uow.products().set_price(id, unit_price))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_products_are_retrievable() {
        let store = Store::new();
        let product = create_product(&store, "Cast Iron Pan", Decimal::new(4500, 2));

        assert_eq!(get_product(&store, product.id), Some(product));
        assert_eq!(get_product(&store, ProductId::new(999)), None);
    }
}
