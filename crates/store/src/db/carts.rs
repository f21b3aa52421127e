//! Cart repository.
//!
//! Owns both the `carts` and `cart_items` tables; a cart item never exists
//! without its cart, and deleting a cart removes its items in the same unit
//! of work.

use std::borrow::Borrow;

use chrono::Utc;

use oxcart_core::{CartId, CartItemId, ProductId};

use super::{RepositoryError, Tables};
use crate::models::{Cart, CartItem};

/// Repository for carts and their items.
pub struct CartRepository<T> {
    tables: T,
}

impl<T> CartRepository<T> {
    pub(crate) const fn new(tables: T) -> Self {
        Self { tables }
    }
}

impl<T: Borrow<Tables>> CartRepository<T> {
    fn view(&self) -> &Tables {
        self.tables.borrow()
    }

    /// Get a cart by its token.
    #[must_use]
    pub fn get(&self, id: CartId) -> Option<Cart> {
        self.view().carts.get(&id).cloned()
    }

    /// All items in a cart, in insertion order.
    #[must_use]
    pub fn items(&self, cart_id: CartId) -> Vec<CartItem> {
        let mut items: Vec<CartItem> = self
            .view()
            .cart_items
            .values()
            .filter(|item| item.cart_id == cart_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id.as_i32());
        items
    }

    /// Get one item, scoped to its cart.
    #[must_use]
    pub fn get_item(&self, cart_id: CartId, item_id: CartItemId) -> Option<CartItem> {
        self.view()
            .cart_items
            .get(&item_id)
            .filter(|item| item.cart_id == cart_id)
            .cloned()
    }
}

impl<'a> CartRepository<&'a mut Tables> {
    /// Create a new empty cart with a fresh token.
    pub fn create(&mut self) -> Cart {
        let cart = Cart {
            id: CartId::random(),
            created_at: Utc::now(),
        };
        self.tables.carts.insert(cart.id, cart.clone());
        cart
    }

    /// Add a product to a cart.
    ///
    /// At most one row exists per (cart, product) pair: adding a product the
    /// cart already holds merges quantities into the existing row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart does not exist.
    pub fn add_item(
        &mut self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartItem, RepositoryError> {
        if !self.tables.carts.contains_key(&cart_id) {
            return Err(RepositoryError::NotFound);
        }

        if let Some(existing) = self
            .tables
            .cart_items
            .values_mut()
            .find(|item| item.cart_id == cart_id && item.product_id == product_id)
        {
            existing.quantity += quantity;
            return Ok(existing.clone());
        }

        let id = self.tables.sequences.next_cart_item();
        let item = CartItem {
            id,
            cart_id,
            product_id,
            quantity,
        };
        self.tables.cart_items.insert(id, item.clone());
        Ok(item)
    }

    /// Set an item's quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist in
    /// this cart.
    pub fn update_item_quantity(
        &mut self,
        cart_id: CartId,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, RepositoryError> {
        let item = self
            .tables
            .cart_items
            .get_mut(&item_id)
            .filter(|item| item.cart_id == cart_id)
            .ok_or(RepositoryError::NotFound)?;
        item.quantity = quantity;
        Ok(item.clone())
    }

    /// Remove one item from a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist in
    /// this cart.
    pub fn remove_item(
        &mut self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        if self
            .tables
            .cart_items
            .get(&item_id)
            .is_none_or(|item| item.cart_id != cart_id)
        {
            return Err(RepositoryError::NotFound);
        }
        self.tables.cart_items.remove(&item_id);
        Ok(())
    }

    /// Delete a cart and all of its items.
    ///
    /// The cascade is explicit: items are removed here, in the same unit of
    /// work as the cart row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart does not exist.
    pub fn delete(&mut self, cart_id: CartId) -> Result<(), RepositoryError> {
        self.tables
            .carts
            .remove(&cart_id)
            .ok_or(RepositoryError::NotFound)?;
        self.tables.cart_items.retain(|_, item| item.cart_id != cart_id);
        Ok(())
    }
}
