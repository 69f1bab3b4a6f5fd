//! Wishlist commands.
//!
//! # Usage
//!
//! ```bash
//! wishlist-cli wishlist create --customer-id 42 --name Birthday
//! wishlist-cli wishlist retrieve --id 7
//! wishlist-cli wishlist update --id 7 --customer-id 42 --name Xmas
//! wishlist-cli wishlist delete --id 7
//! wishlist-cli wishlist delete-all --customer-id 42
//! wishlist-cli wishlist search --name Birthday
//! ```

use clap::{Args, Subcommand};
use wishlist_console::{Console, HttpTransport, WishlistForm};

use crate::output;
use crate::CliError;

/// Wishlist form fields. Unset flags leave the field empty.
#[derive(Args, Debug, Default)]
pub struct WishlistFields {
    /// Wishlist ID
    #[arg(long, default_value = "")]
    id: String,

    /// Owning customer ID
    #[arg(long, default_value = "")]
    customer_id: String,

    /// Wishlist name
    #[arg(long, default_value = "")]
    name: String,

    /// Creation date sent with updates (`YYYY-MM-DD`)
    #[arg(long, default_value = "")]
    created_date: String,

    /// Modification date sent with updates (`YYYY-MM-DD`)
    #[arg(long, default_value = "")]
    modified_date: String,
}

impl WishlistFields {
    fn apply(self, form: &mut WishlistForm) {
        *form = WishlistForm {
            id: self.id,
            customer_id: self.customer_id,
            name: self.name,
            created_date: self.created_date,
            modified_date: self.modified_date,
        };
    }
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Create a wishlist from name and customer ID
    Create(WishlistFields),
    /// Show one wishlist
    Retrieve(WishlistFields),
    /// Overwrite a wishlist with the given fields
    Update(WishlistFields),
    /// Delete one wishlist, or all of a customer's when `--customer-id` is set
    Delete(WishlistFields),
    /// Delete every wishlist of a customer
    DeleteAll(WishlistFields),
    /// Search by customer ID and/or name
    Search(WishlistFields),
}

/// Run one wishlist action and print its outcome.
pub async fn run(console: &Console<HttpTransport>, action: WishlistAction) -> Result<(), CliError> {
    let wishlists = console.wishlists();

    let settled = match action {
        WishlistAction::Create(fields) => {
            wishlists.edit(|form| fields.apply(form));
            wishlists.create().await
        }
        WishlistAction::Retrieve(fields) => {
            wishlists.edit(|form| fields.apply(form));
            wishlists.retrieve().await
        }
        WishlistAction::Update(fields) => {
            wishlists.edit(|form| fields.apply(form));
            wishlists.update().await
        }
        WishlistAction::Delete(fields) => {
            wishlists.edit(|form| fields.apply(form));
            wishlists.delete().await
        }
        WishlistAction::DeleteAll(fields) => {
            wishlists.edit(|form| fields.apply(form));
            wishlists.delete_by_customer().await
        }
        WishlistAction::Search(fields) => {
            wishlists.edit(|form| fields.apply(form));
            wishlists.search().await
        }
    };

    output::finish(&settled, &wishlists.form(), &wishlists.results())
}
