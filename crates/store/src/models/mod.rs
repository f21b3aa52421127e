//! Persisted entities.

pub mod cart;
pub mod customer;
pub mod order;
pub mod product;

pub use cart::{Cart, CartItem};
pub use customer::Customer;
pub use order::{Order, OrderItem};
pub use product::Product;
