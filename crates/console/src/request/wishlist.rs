//! Wishlist requests.

use serde_json::json;

use super::{segment, ApiRequest, QueryParams};
use crate::view::WishlistForm;

/// Collection path.
pub const WISHLISTS_PATH: &str = "/wishlists";

/// Which delete endpoint a wishlist delete takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRoute {
    /// `DELETE /wishlists/{id}`
    Single,
    /// `DELETE /wishlists/customers/{customer_id}`
    ByCustomer,
}

/// Pick the delete endpoint. A present customer id wins over the wishlist id.
#[must_use]
pub fn route_delete(form: &WishlistForm) -> DeleteRoute {
    if form.customer_id.is_empty() {
        DeleteRoute::Single
    } else {
        DeleteRoute::ByCustomer
    }
}

/// `POST /wishlists` with name and owner.
#[must_use]
pub fn create(form: &WishlistForm) -> ApiRequest {
    ApiRequest::post(WISHLISTS_PATH.to_string()).with_body(json!({
        "name": form.name,
        "customer_id": form.customer_id,
    }))
}

/// `GET /wishlists/{id}`
#[must_use]
pub fn retrieve(form: &WishlistForm) -> ApiRequest {
    ApiRequest::get(wishlist_path(&form.id))
}

/// `PUT /wishlists/{id}` with every form field, dates included.
#[must_use]
pub fn update(form: &WishlistForm) -> ApiRequest {
    ApiRequest::put(wishlist_path(&form.id)).with_body(json!({
        "name": form.name,
        "id": form.id,
        "customer_id": form.customer_id,
        "created_date": form.created_date,
        "modified_date": form.modified_date,
    }))
}

/// `DELETE /wishlists/{id}`
#[must_use]
pub fn delete_single(form: &WishlistForm) -> ApiRequest {
    ApiRequest::delete(wishlist_path(&form.id))
}

/// `DELETE /wishlists/customers/{customer_id}`
#[must_use]
pub fn delete_by_customer(form: &WishlistForm) -> ApiRequest {
    ApiRequest::delete(format!(
        "{WISHLISTS_PATH}/customers/{}",
        segment(&form.customer_id)
    ))
}

/// `GET /wishlists?{customer_id,name}`
#[must_use]
pub fn search(form: &WishlistForm) -> ApiRequest {
    ApiRequest::get(WISHLISTS_PATH.to_string()).with_query(search_query(form))
}

/// Filters for a wishlist search, present fields only.
#[must_use]
pub fn search_query(form: &WishlistForm) -> QueryParams {
    let mut query = QueryParams::new();
    query
        .push_present("customer_id", &form.customer_id)
        .push_present("name", &form.name);
    query
}

fn wishlist_path(id: &str) -> String {
    format!("{WISHLISTS_PATH}/{}", segment(id))
}
