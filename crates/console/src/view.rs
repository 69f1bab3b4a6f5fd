//! Typed view models.
//!
//! A form holds exactly what the corresponding input fields show, as text. It
//! is the single source of truth for "the entity currently displayed" and is
//! replaced wholesale by every successful response, never merged.

use crate::resource::Resource;
use crate::table::ResultTable;

/// Fields of the wishlist form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistForm {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub created_date: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub modified_date: String,
}

/// Fields of the item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub id: String,
    /// Parent wishlist; required to create or search items.
    pub wishlist_id: String,
    pub product_id: String,
    /// Free text, parsed to a number when sent.
    pub price: String,
    pub description: String,
    pub added_date: String,
    pub modified_date: String,
}

/// Item inputs that sit beside the form.
///
/// Sort selectors and the move panel are not part of the displayed entity, so
/// reconciliation never touches them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInputs {
    pub sort_by: String,
    pub sort_order: String,
    pub move_source_wishlist_id: String,
    pub move_target_wishlist_id: String,
    pub move_item_id: String,
}

/// Everything one controller shows: the form, its side inputs and the
/// result table of the last search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceView<R: Resource> {
    pub form: R::Form,
    pub inputs: R::Inputs,
    pub results: ResultTable,
}
