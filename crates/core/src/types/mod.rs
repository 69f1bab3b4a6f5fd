//! Core types for the wishlist console.
//!
//! This module provides type-safe wrappers for the values the wishlist
//! service exchanges with its clients.

pub mod date;
pub mod id;
pub mod price;

pub use date::{DateError, ServerDate};
pub use id::*;
pub use price::{parse_price_text, price_to_json};
