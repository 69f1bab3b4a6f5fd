//! Field-mapping tables for the two resources.
//!
//! A [`Resource`] describes how entities returned by the service map onto the
//! form and onto result-table rows. The generic controller and reconciler use
//! nothing else, so wishlists and items share one implementation.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use wishlist_console_core::{ServerDate, Wishlist, WishlistItem};

use crate::reconcile::ReconcileError;
use crate::table::TableColumn;
use crate::view::{ItemForm, ItemInputs, WishlistForm};

/// Mapping between a service entity and its view model.
pub trait Resource: Debug + Clone + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Entity as returned by the service.
    type Entity: DeserializeOwned + Send;
    /// Form fields showing one entity.
    type Form: Debug + Clone + Default + PartialEq + Eq + Send;
    /// Inputs beside the form that reconciliation leaves alone.
    type Inputs: Debug + Clone + Default + PartialEq + Eq + Send;

    /// Name used in logs.
    const LABEL: &'static str;

    /// Columns of the search result table.
    fn columns() -> Vec<TableColumn>;

    /// One result-table row, cells in column order.
    fn row(entity: &Self::Entity) -> Vec<String>;

    /// Build a complete form from an entity.
    ///
    /// # Errors
    ///
    /// Returns error if a field cannot be rendered, e.g. an unparseable date.
    fn to_form(entity: &Self::Entity) -> Result<Self::Form, ReconcileError>;
}

/// Wishlists: dates are normalized to `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WishlistResource;

impl Resource for WishlistResource {
    type Entity = Wishlist;
    type Form = WishlistForm;
    type Inputs = ();

    const LABEL: &'static str = "wishlist";

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("id", "ID"),
            TableColumn::new("customer_id", "Customer ID"),
            TableColumn::new("name", "Name"),
        ]
    }

    fn row(wishlist: &Wishlist) -> Vec<String> {
        vec![
            wishlist.id.to_string(),
            wishlist.customer_id.to_string(),
            wishlist.name.clone(),
        ]
    }

    fn to_form(wishlist: &Wishlist) -> Result<WishlistForm, ReconcileError> {
        Ok(WishlistForm {
            id: wishlist.id.to_string(),
            customer_id: wishlist.customer_id.to_string(),
            name: wishlist.name.clone(),
            created_date: calendar_date("created_date", wishlist.created_date.as_ref())?,
            modified_date: calendar_date("modified_date", wishlist.modified_date.as_ref())?,
        })
    }
}

/// Wishlist items: dates pass through as sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemResource;

impl Resource for ItemResource {
    type Entity = WishlistItem;
    type Form = ItemForm;
    type Inputs = ItemInputs;

    const LABEL: &'static str = "item";

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("id", "ID"),
            TableColumn::new("product_id", "Product ID"),
            TableColumn::new("description", "Description"),
            TableColumn::new("wishlist_id", "Wishlist ID"),
            TableColumn::new("price", "Price"),
            TableColumn::new("added_date", "Added Date"),
            TableColumn::new("modified_date", "Modified Date"),
        ]
    }

    fn row(item: &WishlistItem) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.product_id.to_string(),
            item.description.clone().unwrap_or_default(),
            item.wishlist_id.to_string(),
            price_text(item.price),
            raw_date(item.added_date.as_ref()),
            raw_date(item.modified_date.as_ref()),
        ]
    }

    fn to_form(item: &WishlistItem) -> Result<ItemForm, ReconcileError> {
        Ok(ItemForm {
            id: item.id.to_string(),
            wishlist_id: item.wishlist_id.to_string(),
            product_id: item.product_id.to_string(),
            price: price_text(item.price),
            description: item.description.clone().unwrap_or_default(),
            added_date: raw_date(item.added_date.as_ref()),
            modified_date: raw_date(item.modified_date.as_ref()),
        })
    }
}

/// Normalize a date for the form. A missing date leaves the field empty.
fn calendar_date(field: &'static str, date: Option<&ServerDate>) -> Result<String, ReconcileError> {
    date.map_or_else(
        || Ok(String::new()),
        |date| {
            date.to_form_value()
                .map_err(|source| ReconcileError::Date { field, source })
        },
    )
}

fn raw_date(date: Option<&ServerDate>) -> String {
    date.map(ServerDate::raw_text).unwrap_or_default()
}

fn price_text(price: Option<f64>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}
