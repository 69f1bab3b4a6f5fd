//! Wishlist Console Core - Shared types library.
//!
//! This crate provides common types used across all wishlist console components:
//! - `console` - Request building, response reconciliation and controllers
//! - `cli` - Command-line host that drives the controllers
//! - `integration-tests` - Stub service and end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Opaque ids, server dates and price text parsing
//! - [`models`] - The `Wishlist` and `WishlistItem` entities as the service returns them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::{Wishlist, WishlistItem};
pub use types::*;
