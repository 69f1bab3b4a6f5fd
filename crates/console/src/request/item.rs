//! Wishlist item requests, all scoped under a parent wishlist.

use serde_json::{json, Value};
use wishlist_console_core::{parse_price_text, price_to_json};

use super::{segment, ApiRequest, QueryParams, ValidationError};
use crate::view::{ItemForm, ItemInputs};

/// `POST /wishlists/{wid}/items`
///
/// # Errors
///
/// Returns [`ValidationError::MissingWishlistId`] when the parent wishlist
/// field is empty or only whitespace. No request is built in that case.
pub fn create(form: &ItemForm) -> Result<ApiRequest, ValidationError> {
    if form.wishlist_id.trim().is_empty() {
        return Err(ValidationError::MissingWishlistId);
    }
    Ok(ApiRequest::post(items_path(&form.wishlist_id)).with_body(body(form)))
}

/// `GET /wishlists/{wid}/items/{id}`
#[must_use]
pub fn retrieve(form: &ItemForm) -> ApiRequest {
    ApiRequest::get(item_path(&form.wishlist_id, &form.id))
}

/// `PUT /wishlists/{wid}/items/{id}`
#[must_use]
pub fn update(form: &ItemForm) -> ApiRequest {
    ApiRequest::put(item_path(&form.wishlist_id, &form.id)).with_body(body(form))
}

/// `DELETE /wishlists/{wid}/items/{id}`
#[must_use]
pub fn delete(form: &ItemForm) -> ApiRequest {
    ApiRequest::delete(item_path(&form.wishlist_id, &form.id))
}

/// `GET /wishlists/{wid}/items?{price,sort_by,order}`
#[must_use]
pub fn search(form: &ItemForm, inputs: &ItemInputs) -> ApiRequest {
    ApiRequest::get(items_path(&form.wishlist_id)).with_query(search_query(form, inputs))
}

/// Filters for an item search. The price filter is the raw field text.
#[must_use]
pub fn search_query(form: &ItemForm, inputs: &ItemInputs) -> QueryParams {
    let mut query = QueryParams::new();
    query
        .push_present("price", &form.price)
        .push_present("sort_by", &inputs.sort_by)
        .push_present("order", &inputs.sort_order);
    query
}

/// `PUT /wishlists/{src}/items/{id}/move-to/{dst}`, no body.
///
/// Source, target and item come from the move inputs, not from the form.
#[must_use]
pub fn move_to(inputs: &ItemInputs) -> ApiRequest {
    ApiRequest::put(format!(
        "{}/move-to/{}",
        item_path(&inputs.move_source_wishlist_id, &inputs.move_item_id),
        segment(&inputs.move_target_wishlist_id)
    ))
}

fn body(form: &ItemForm) -> Value {
    json!({
        "product_id": form.product_id,
        "price": price_to_json(parse_price_text(&form.price)),
        "description": form.description,
        "wishlist_id": form.wishlist_id,
    })
}

fn items_path(wishlist_id: &str) -> String {
    format!("/wishlists/{}/items", segment(wishlist_id))
}

fn item_path(wishlist_id: &str, item_id: &str) -> String {
    format!("{}/{}", items_path(wishlist_id), segment(item_id))
}
