//! Oxcart Core - Shared types library.
//!
//! This crate provides common types used across all Oxcart Market components:
//! - `store` - Domain engine (carts, orders, checkout)
//! - `api` - Public JSON API server
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
