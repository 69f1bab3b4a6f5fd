//! Entities as the wishlist service returns them.

use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, ItemId, ProductId, ServerDate, WishlistId};

/// A customer's named wishlist.
///
/// Older deployments of the service key wishlists by `wishlist_id` instead of
/// `id`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(alias = "wishlist_id")]
    pub id: WishlistId,
    pub customer_id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub created_date: Option<ServerDate>,
    #[serde(default)]
    pub modified_date: Option<ServerDate>,
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}

/// A product saved to a wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ItemId,
    pub wishlist_id: WishlistId,
    pub product_id: ProductId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub added_date: Option<ServerDate>,
    #[serde(default)]
    pub modified_date: Option<ServerDate>,
}
