//! CLI command implementations.

pub mod health;
pub mod item;
pub mod wishlist;
