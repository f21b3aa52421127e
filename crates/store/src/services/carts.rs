//! Cart operations: create, inspect, and edit cart lines.

use rust_decimal::Decimal;
use thiserror::Error;

use oxcart_core::{CartId, CartItemId, ProductId};

use crate::db::{RepositoryError, Store};
use crate::models::{Cart, CartItem, Product};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart with the given token.
    #[error("cart not found")]
    UnknownCart,

    /// No such item in this cart.
    #[error("cart item not found")]
    UnknownItem,

    /// The referenced product is not in the catalog.
    #[error("no product with the given id")]
    UnknownProduct,

    /// Quantities must be positive integers.
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    /// Lower-level store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One cart line joined with its product.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

impl CartLine {
    /// Line total at the product's current price.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.product.unit_price * Decimal::from(self.item.quantity)
    }
}

/// A cart with its lines resolved against the catalog.
#[derive(Debug, Clone)]
pub struct CartContents {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
}

impl CartContents {
    /// Sum of all line totals.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::total_price).sum()
    }
}

/// Create a new empty cart.
pub fn create_cart(store: &Store) -> Cart {
    store.mutate(|uow| uow.carts().create())
}

/// Load a cart with its items priced at current catalog prices.
///
/// # Errors
///
/// Returns `CartError::UnknownCart` if no cart has the given token.
pub fn cart_contents(store: &Store, cart_id: CartId) -> Result<CartContents, CartError> {
    store.read(|txn| {
        let cart = txn.carts().get(cart_id).ok_or(CartError::UnknownCart)?;
        let mut lines = Vec::new();
        for item in txn.carts().items(cart_id) {
            let product = txn.products().get(item.product_id).ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "cart item {} references missing product {}",
                    item.id, item.product_id
                ))
            })?;
            lines.push(CartLine { item, product });
        }
        Ok(CartContents { cart, lines })
    })
}

/// Add a product to a cart, merging with an existing line for the same
/// product.
///
/// # Errors
///
/// Returns `CartError::InvalidQuantity` for a zero quantity,
/// `CartError::UnknownProduct` if the product is not in the catalog, and
/// `CartError::UnknownCart` if the cart does not exist.
pub fn add_item(
    store: &Store,
    cart_id: CartId,
    product_id: ProductId,
    quantity: u32,
) -> Result<CartItem, CartError> {
    if quantity == 0 {
        return Err(CartError::InvalidQuantity);
    }

    store.transaction(|uow| {
        if uow.products().get(product_id).is_none() {
            return Err(CartError::UnknownProduct);
        }
        match uow.carts().add_item(cart_id, product_id, quantity) {
            Ok(item) => Ok(item),
            Err(RepositoryError::NotFound) => Err(CartError::UnknownCart),
            Err(other) => Err(CartError::Repository(other)),
        }
    })
}

/// Set a cart line's quantity.
///
/// # Errors
///
/// Returns `CartError::InvalidQuantity` for a zero quantity and
/// `CartError::UnknownItem` if the item does not exist in this cart.
pub fn update_item(
    store: &Store,
    cart_id: CartId,
    item_id: CartItemId,
    quantity: u32,
) -> Result<CartItem, CartError> {
    if quantity == 0 {
        return Err(CartError::InvalidQuantity);
    }

    store.transaction(|uow| {
        match uow.carts().update_item_quantity(cart_id, item_id, quantity) {
            Ok(item) => Ok(item),
            Err(RepositoryError::NotFound) => Err(CartError::UnknownItem),
            Err(other) => Err(CartError::Repository(other)),
        }
    })
}

/// Remove a line from a cart.
///
/// # Errors
///
/// Returns `CartError::UnknownItem` if the item does not exist in this cart.
pub fn remove_item(store: &Store, cart_id: CartId, item_id: CartItemId) -> Result<(), CartError> {
    store.transaction(|uow| match uow.carts().remove_item(cart_id, item_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(CartError::UnknownItem),
        Err(other) => Err(CartError::Repository(other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::products;

    fn seeded() -> (Store, CartId, ProductId) {
        let store = Store::new();
        let product = products::create_product(&store, "Enamel Mug", Decimal::new(1250, 2));
        let cart = create_cart(&store);
        (store, cart.id, product.id)
    }

    #[test]
    fn zero_quantity_is_rejected_before_any_write() {
        let (store, cart_id, product_id) = seeded();

        assert!(matches!(
            add_item(&store, cart_id, product_id, 0),
            Err(CartError::InvalidQuantity)
        ));
        assert!(cart_contents(&store, cart_id).expect("cart").lines.is_empty());
    }

    #[test]
    fn unknown_product_is_rejected() {
        let (store, cart_id, _) = seeded();
        assert!(matches!(
            add_item(&store, cart_id, ProductId::new(999), 1),
            Err(CartError::UnknownProduct)
        ));
    }

    #[test]
    fn contents_totals_follow_current_prices() {
        let (store, cart_id, product_id) = seeded();
        add_item(&store, cart_id, product_id, 2).expect("add");

        let contents = cart_contents(&store, cart_id).expect("cart");
        assert_eq!(contents.total_price(), Decimal::new(2500, 2));

        // cart views are priced live, unlike order items
        products::set_price(&store, product_id, Decimal::new(2000, 2)).expect("reprice");
        let contents = cart_contents(&store, cart_id).expect("cart");
        assert_eq!(contents.total_price(), Decimal::new(4000, 2));
    }

    #[test]
    fn update_rewrites_quantity_in_place() {
        let (store, cart_id, product_id) = seeded();
        let item = add_item(&store, cart_id, product_id, 1).expect("add");

        let updated = update_item(&store, cart_id, item.id, 5).expect("update");
        assert_eq!(updated.quantity, 5);

        assert!(matches!(
            update_item(&store, cart_id, item.id, 0),
            Err(CartError::InvalidQuantity)
        ));
    }

    #[test]
    fn removing_a_missing_item_reports_unknown_item() {
        let (store, cart_id, _) = seeded();
        assert!(matches!(
            remove_item(&store, cart_id, CartItemId::new(1)),
            Err(CartError::UnknownItem)
        ));
    }
}
