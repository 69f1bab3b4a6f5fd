//! Wishlist actions.

use super::{Settled, WishlistController};
use crate::reconcile::{OnFailure, OnSuccess, Plan, GENERIC_FAILURE, SUCCESS};
use crate::request::wishlist::{self as build, DeleteRoute};
use crate::transport::Transport;

const CREATED: &str = "Wishlist has been created!";
const DELETED: &str = "Wishlist has been deleted!";

const CREATE: Plan = Plan::new(OnSuccess::Populate(CREATED), OnFailure::Report);
const RETRIEVE: Plan = Plan::new(OnSuccess::Populate(SUCCESS), OnFailure::ClearAndReport);
const UPDATE: Plan = Plan::new(OnSuccess::Populate(SUCCESS), OnFailure::Report);
const DELETE_SINGLE: Plan = Plan::new(OnSuccess::Clear(DELETED), OnFailure::Fixed(GENERIC_FAILURE));
const DELETE_BY_CUSTOMER: Plan = Plan::new(OnSuccess::Clear(DELETED), OnFailure::Report);
const SEARCH: Plan = Plan::new(OnSuccess::List(SUCCESS), OnFailure::Report);

impl<T: Transport> WishlistController<T> {
    /// `POST /wishlists`. Empties the result table before sending.
    pub async fn create(&self) -> Settled {
        self.clear_results();
        self.dispatch("create", CREATE, |view| Ok(build::create(&view.form)))
            .await
    }

    /// `GET /wishlists/{id}`. Clears the form on failure.
    pub async fn retrieve(&self) -> Settled {
        self.dispatch("retrieve", RETRIEVE, |view| Ok(build::retrieve(&view.form)))
            .await
    }

    /// `PUT /wishlists/{id}`.
    pub async fn update(&self) -> Settled {
        self.dispatch("update", UPDATE, |view| Ok(build::update(&view.form)))
            .await
    }

    /// Delete from the form.
    ///
    /// With a customer id in the form every wishlist of that customer is
    /// deleted, even if a wishlist id is also present. Otherwise only the
    /// wishlist with the form's id is deleted.
    pub async fn delete(&self) -> Settled {
        self.dispatch_planned("delete", |view| {
            Ok(match build::route_delete(&view.form) {
                DeleteRoute::ByCustomer => {
                    (DELETE_BY_CUSTOMER, build::delete_by_customer(&view.form))
                }
                DeleteRoute::Single => (DELETE_SINGLE, build::delete_single(&view.form)),
            })
        })
        .await
    }

    /// `DELETE /wishlists/customers/{customer_id}`.
    pub async fn delete_by_customer(&self) -> Settled {
        self.dispatch("delete_by_customer", DELETE_BY_CUSTOMER, |view| {
            Ok(build::delete_by_customer(&view.form))
        })
        .await
    }

    /// `GET /wishlists?{customer_id,name}`. Renders the results and copies
    /// the first match into the form.
    pub async fn search(&self) -> Settled {
        self.dispatch("search", SEARCH, |view| Ok(build::search(&view.form)))
            .await
    }
}
