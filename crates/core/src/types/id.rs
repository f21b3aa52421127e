//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Cart identifiers are
//! the exception: a cart is addressed by an opaque UUID token ([`CartId`])
//! handed to anonymous clients, not by a sequential integer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use oxcart_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new(1);
/// let order_id = OrderId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(CartItemId);
define_id!(CustomerId);
define_id!(OrderId);
define_id!(OrderItemId);

/// Errors that can occur when parsing a [`CartId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CartIdError {
    /// The input string is not a valid UUID.
    #[error("invalid cart id: {0}")]
    Invalid(#[from] uuid::Error),
}

/// Opaque cart token.
///
/// Carts belong to anonymous sessions, so their identifiers must be
/// unguessable: a freshly generated UUID v4 rather than a sequential row id.
///
/// ## Examples
///
/// ```
/// use oxcart_core::CartId;
///
/// let id = CartId::random();
/// let parsed = CartId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(Uuid);

impl CartId {
    /// Generate a fresh random cart token.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a cart token from its string form.
    ///
    /// # Errors
    ///
    /// Returns `CartIdError::Invalid` if the input is not a valid UUID.
    pub fn parse(input: &str) -> Result<Self, CartIdError> {
        Ok(Self(Uuid::parse_str(input)?))
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CartId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_ids_are_unique() {
        assert_ne!(CartId::random(), CartId::random());
    }

    #[test]
    fn cart_id_round_trips_through_string_form() {
        let id = CartId::random();
        let parsed = CartId::parse(&id.to_string()).expect("valid token");
        assert_eq!(id, parsed);
    }

    #[test]
    fn cart_id_rejects_garbage() {
        assert!(CartId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn integer_ids_convert_both_ways() {
        let id = OrderId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(OrderId::from(42), id);
        assert_eq!(i32::from(id), 42);
    }
}
