//! Customer repository.

use std::borrow::Borrow;

use oxcart_core::{CustomerId, MembershipTier, UserId};

use super::{RepositoryError, Tables};
use crate::models::Customer;

/// Repository for customer profiles.
pub struct CustomerRepository<T> {
    tables: T,
}

impl<T> CustomerRepository<T> {
    pub(crate) const fn new(tables: T) -> Self {
        Self { tables }
    }
}

impl<T: Borrow<Tables>> CustomerRepository<T> {
    fn view(&self) -> &Tables {
        self.tables.borrow()
    }

    /// Get a customer by ID.
    #[must_use]
    pub fn get(&self, id: CustomerId) -> Option<Customer> {
        self.view().customers.get(&id).cloned()
    }

    /// Get the customer profile for a user, if one exists.
    #[must_use]
    pub fn get_by_user(&self, user_id: UserId) -> Option<Customer> {
        self.view()
            .customers
            .values()
            .find(|customer| customer.user_id == user_id)
            .cloned()
    }
}

impl<'a> CustomerRepository<&'a mut Tables> {
    /// Create a customer profile for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a
    /// profile; exactly one customer may exist per user.
    pub fn create(&mut self, user_id: UserId) -> Result<Customer, RepositoryError> {
        if self.get_by_user(user_id).is_some() {
            return Err(RepositoryError::Conflict(
                "customer already exists for user".to_owned(),
            ));
        }

        let id = self.tables.sequences.next_customer();
        let customer = Customer {
            id,
            user_id,
            membership: MembershipTier::default(),
            phone: None,
        };
        self.tables.customers.insert(id, customer.clone());
        Ok(customer)
    }

    /// Get the customer profile for a user, creating it on first use.
    ///
    /// Concurrent first orders by the same user are serialized by the
    /// store's single writer; whichever transaction runs second finds the
    /// winner's row here instead of violating the uniqueness constraint.
    pub fn get_or_create(&mut self, user_id: UserId) -> Customer {
        if let Some(existing) = self.get_by_user(user_id) {
            return existing;
        }

        let id = self.tables.sequences.next_customer();
        let customer = Customer {
            id,
            user_id,
            membership: MembershipTier::default(),
            phone: None,
        };
        self.tables.customers.insert(id, customer.clone());
        customer
    }
}
