//! Customer profile.

use serde::{Deserialize, Serialize};

use oxcart_core::{CustomerId, MembershipTier, UserId};

/// Persistent profile linked one-to-one to an authenticated user.
///
/// Created lazily on a user's first order; outlives any single order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub membership: MembershipTier,
    pub phone: Option<String>,
}
