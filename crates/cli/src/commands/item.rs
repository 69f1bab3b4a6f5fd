//! Wishlist item commands.
//!
//! # Usage
//!
//! ```bash
//! wishlist-cli item create --wishlist-id 7 --product-id p-1 --price 19.99
//! wishlist-cli item retrieve --wishlist-id 7 --id 5
//! wishlist-cli item search --wishlist-id 7 --sort-by price --order asc
//! wishlist-cli item move --source 7 --item 5 --target 9
//! ```

use clap::{Args, Subcommand};
use wishlist_console::{Console, HttpTransport, ItemForm, ItemInputs};

use crate::output;
use crate::CliError;

/// Item form fields. Unset flags leave the field empty.
#[derive(Args, Debug, Default)]
pub struct ItemFields {
    /// Item ID
    #[arg(long, default_value = "")]
    id: String,

    /// Parent wishlist ID
    #[arg(long, default_value = "")]
    wishlist_id: String,

    /// Product ID
    #[arg(long, default_value = "")]
    product_id: String,

    /// Price; for `search` an exact-price filter
    #[arg(long, default_value = "")]
    price: String,

    /// Description
    #[arg(long, default_value = "")]
    description: String,
}

impl ItemFields {
    fn apply(self, form: &mut ItemForm) {
        *form = ItemForm {
            id: self.id,
            wishlist_id: self.wishlist_id,
            product_id: self.product_id,
            price: self.price,
            description: self.description,
            ..ItemForm::default()
        };
    }
}

/// Sort selectors for `item search`.
#[derive(Args, Debug, Default)]
pub struct SortFields {
    /// Field to sort by, e.g. `price`
    #[arg(long, default_value = "")]
    sort_by: String,

    /// `asc` or `desc`
    #[arg(long, default_value = "")]
    order: String,
}

/// Inputs of the move panel.
#[derive(Args, Debug)]
pub struct MoveFields {
    /// Wishlist the item is in now
    #[arg(long)]
    source: String,

    /// Item to move
    #[arg(long)]
    item: String,

    /// Wishlist to move the item to
    #[arg(long)]
    target: String,
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add an item to a wishlist
    Create(ItemFields),
    /// Show one item
    Retrieve(ItemFields),
    /// Overwrite an item with the given fields
    Update(ItemFields),
    /// Delete one item
    Delete(ItemFields),
    /// List the items of a wishlist
    Search {
        #[command(flatten)]
        fields: ItemFields,
        #[command(flatten)]
        sort: SortFields,
    },
    /// Move an item to another wishlist of the same customer
    Move(MoveFields),
}

/// Run one item action and print its outcome.
pub async fn run(console: &Console<HttpTransport>, action: ItemAction) -> Result<(), CliError> {
    let items = console.items();

    let settled = match action {
        ItemAction::Create(fields) => {
            items.edit(|form| fields.apply(form));
            items.create().await
        }
        ItemAction::Retrieve(fields) => {
            items.edit(|form| fields.apply(form));
            items.retrieve().await
        }
        ItemAction::Update(fields) => {
            items.edit(|form| fields.apply(form));
            items.update().await
        }
        ItemAction::Delete(fields) => {
            items.edit(|form| fields.apply(form));
            items.delete().await
        }
        ItemAction::Search { fields, sort } => {
            items.edit(|form| fields.apply(form));
            items.edit_inputs(|inputs| {
                inputs.sort_by = sort.sort_by;
                inputs.sort_order = sort.order;
            });
            items.search().await
        }
        ItemAction::Move(moving) => {
            items.edit_inputs(|inputs| {
                *inputs = ItemInputs {
                    move_source_wishlist_id: moving.source,
                    move_target_wishlist_id: moving.target,
                    move_item_id: moving.item,
                    ..ItemInputs::default()
                };
            });
            items.move_to_wishlist().await
        }
    };

    output::finish(&settled, &items.form(), &items.results())
}
