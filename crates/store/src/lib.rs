//! Oxcart Store - domain engine for the order service.
//!
//! This crate owns everything between the HTTP surface and the data:
//!
//! - [`models`] - the persisted entities (products, carts, customers, orders)
//! - [`db`] - the in-process transactional store and its repositories
//! - [`services`] - business operations (cart editing, checkout, order reads)
//! - [`events`] - the order-placed notification queue and delivery worker
//!
//! # Architecture
//!
//! State lives in a single [`Store`], a process-local set of tables behind a
//! reader-writer lock. All mutations go through a unit of work: a working
//! copy of the tables that is published atomically on success and discarded
//! on failure. Services never hold the lock across I/O; the only outbound
//! side effect (order confirmations) crosses an [`events::EventSink`] after
//! the unit of work has committed.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod db;
pub mod events;
pub mod models;
pub mod services;

pub use db::{RepositoryError, Store};
