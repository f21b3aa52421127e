//! Business operations over the store.
//!
//! Each submodule owns one slice of the API surface and its error type:
//!
//! - [`carts`] - create and edit anonymous carts
//! - [`checkout`] - convert a cart into an order, atomically
//! - [`orders`] - read orders, enforcing ownership
//! - [`products`] - minimal catalog support (seeding, price changes)

pub mod carts;
pub mod checkout;
pub mod orders;
pub mod products;

use oxcart_core::UserId;

/// Identity of the caller, as supplied by the authorization collaborator.
///
/// Authentication itself happens upstream; by the time a service runs, the
/// caller is known to be a real user, and `is_staff` says whether they hold
/// the administrative role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: UserId,
    pub is_staff: bool,
}

impl Requester {
    /// A regular authenticated user.
    #[must_use]
    pub const fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            is_staff: false,
        }
    }

    /// A staff member.
    #[must_use]
    pub const fn staff(user_id: UserId) -> Self {
        Self {
            user_id,
            is_staff: true,
        }
    }
}
