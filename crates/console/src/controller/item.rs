//! Wishlist item actions.

use super::{ItemController, Settled};
use crate::reconcile::{OnFailure, OnSuccess, Plan, GENERIC_FAILURE, SUCCESS};
use crate::request::item as build;
use crate::transport::Transport;

const CREATED: &str = "An item has been created!";
const MOVED: &str = "Item has been successfully moved to target wishlist";

const CREATE: Plan = Plan::new(OnSuccess::Populate(CREATED), OnFailure::Report);
const RETRIEVE: Plan = Plan::new(OnSuccess::Populate(SUCCESS), OnFailure::ClearAndReport);
const UPDATE: Plan = Plan::new(OnSuccess::Populate(SUCCESS), OnFailure::Report);
const DELETE: Plan = Plan::new(OnSuccess::Clear(SUCCESS), OnFailure::Fixed(GENERIC_FAILURE));
const SEARCH: Plan = Plan::new(OnSuccess::List(SUCCESS), OnFailure::Report);
const MOVE: Plan = Plan::new(OnSuccess::Populate(MOVED), OnFailure::ClearAndReport);

impl<T: Transport> ItemController<T> {
    /// `POST /wishlists/{wid}/items`.
    ///
    /// Settles locally with "Wishlist ID cannot be empty" when the parent
    /// wishlist field is blank.
    pub async fn create(&self) -> Settled {
        self.dispatch("create", CREATE, |view| build::create(&view.form))
            .await
    }

    /// `GET /wishlists/{wid}/items/{id}`. Clears the form on failure.
    pub async fn retrieve(&self) -> Settled {
        self.dispatch("retrieve", RETRIEVE, |view| Ok(build::retrieve(&view.form)))
            .await
    }

    /// `PUT /wishlists/{wid}/items/{id}`.
    pub async fn update(&self) -> Settled {
        self.dispatch("update", UPDATE, |view| Ok(build::update(&view.form)))
            .await
    }

    /// `DELETE /wishlists/{wid}/items/{id}`. Clears every form field,
    /// dates included.
    pub async fn delete(&self) -> Settled {
        self.dispatch("delete", DELETE, |view| Ok(build::delete(&view.form)))
            .await
    }

    /// `GET /wishlists/{wid}/items?{price,sort_by,order}`. Renders the
    /// results and copies the first match into the form.
    pub async fn search(&self) -> Settled {
        self.dispatch("search", SEARCH, |view| {
            Ok(build::search(&view.form, &view.inputs))
        })
        .await
    }

    /// `PUT /wishlists/{src}/items/{id}/move-to/{dst}` from the move inputs.
    ///
    /// On success the form shows the item as the service returned it, under
    /// its new parent. On failure the form is cleared.
    pub async fn move_to_wishlist(&self) -> Settled {
        self.dispatch("move", MOVE, |view| Ok(build::move_to(&view.inputs)))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::notification::{Notification, NotificationSink};
    use crate::testing::FakeTransport;
    use crate::view::ItemForm;

    fn controller() -> (ItemController<FakeTransport>, Arc<FakeTransport>, NotificationSink) {
        let fake = Arc::new(FakeTransport::new());
        let sink = NotificationSink::new();
        let controller = ItemController::new(Arc::clone(&fake), sink.clone());
        (controller, fake, sink)
    }

    fn item(id: &str, wishlist_id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "wishlist_id": wishlist_id,
            "product_id": "p-1",
            "description": "Kettle",
            "price": 19.99,
            "added_date": "2024-10-15",
            "modified_date": "2024-10-16"
        })
    }

    #[tokio::test]
    async fn test_create_without_wishlist_never_sends() {
        for blank in ["", "   "] {
            let (controller, fake, sink) = controller();
            controller.edit(|form| {
                form.wishlist_id = blank.to_string();
                form.product_id = "p-1".to_string();
            });

            let settled = controller.create().await;

            assert!(fake.requests().is_empty());
            let expected = Notification::error("Wishlist ID cannot be empty");
            assert_eq!(settled, Settled::Applied(expected.clone()));
            assert_eq!(sink.current(), Some(expected));
            assert_eq!(controller.form().product_id, "p-1");
        }
    }

    #[tokio::test]
    async fn test_create_populates_form() {
        let (controller, fake, sink) = controller();
        fake.respond("POST /wishlists/A/items", 201, item("5", "A"));
        controller.edit(|form| {
            form.wishlist_id = "A".to_string();
            form.product_id = "p-1".to_string();
            form.price = "19.99".to_string();
        });

        let _ = controller.create().await;

        assert_eq!(sink.current(), Some(Notification::success("An item has been created!")));
        let form = controller.form();
        assert_eq!(form.id, "5");
        assert_eq!(form.description, "Kettle");
        assert_eq!(form.added_date, "2024-10-15");
        assert_eq!(fake.requests()[0].body.as_ref().unwrap()["price"], 19.99);
    }

    #[tokio::test]
    async fn test_delete_clears_dates_and_keeps_inputs() {
        let (controller, fake, sink) = controller();
        fake.respond_empty("DELETE /wishlists/A/items/5", 204);
        controller.edit(|form| {
            form.id = "5".to_string();
            form.wishlist_id = "A".to_string();
            form.added_date = "2024-10-15".to_string();
            form.modified_date = "2024-10-16".to_string();
        });
        controller.edit_inputs(|inputs| inputs.sort_by = "price".to_string());

        let _ = controller.delete().await;

        assert_eq!(controller.form(), ItemForm::default());
        assert_eq!(controller.inputs().sort_by, "price");
        assert_eq!(sink.current(), Some(Notification::success("Success")));
    }

    #[tokio::test]
    async fn test_delete_failure_is_generic() {
        let (controller, fake, sink) = controller();
        fake.respond("DELETE /wishlists/A/items/5", 404, json!({"message": "not here"}));
        controller.edit(|form| {
            form.id = "5".to_string();
            form.wishlist_id = "A".to_string();
        });

        let _ = controller.delete().await;

        assert_eq!(sink.current(), Some(Notification::error("Server error!")));
        assert_eq!(controller.form().id, "5");
    }

    #[tokio::test]
    async fn test_search_sends_filters_and_promotes_first() {
        let (controller, fake, _sink) = controller();
        fake.respond(
            "GET /wishlists/A/items?sort_by=price&order=desc",
            200,
            json!([item("9", "A"), item("2", "A")]),
        );
        controller.edit(|form| form.wishlist_id = "A".to_string());
        controller.edit_inputs(|inputs| {
            inputs.sort_by = "price".to_string();
            inputs.sort_order = "desc".to_string();
        });

        let _ = controller.search().await;

        let results = controller.results();
        assert_eq!(results.len(), 2);
        assert_eq!(results.cell(0, "id"), Some("9"));
        assert_eq!(results.cell(1, "id"), Some("2"));
        assert_eq!(results.cell(0, "price"), Some("19.99"));
        assert_eq!(controller.form().id, "9");
        assert_eq!(controller.inputs().sort_order, "desc");
    }

    #[tokio::test]
    async fn test_search_failure_keeps_table_and_form() {
        let (controller, fake, sink) = controller();
        let route = "GET /wishlists/A/items?price=19.99";
        fake.respond(route, 200, json!([item("5", "A")]));
        fake.respond(route, 404, json!({"message": "Wishlist with id 'A' was not found."}));
        controller.edit(|form| {
            form.wishlist_id = "A".to_string();
            form.price = "19.99".to_string();
        });

        let _ = controller.search().await;
        assert_eq!(controller.results().len(), 1);
        assert_eq!(controller.form().id, "5");
        let before = controller.view();

        let settled = controller.search().await;

        let expected = Notification::error("Wishlist with id 'A' was not found.");
        assert_eq!(settled, Settled::Applied(expected.clone()));
        assert_eq!(sink.current(), Some(expected));
        assert_eq!(controller.view(), before);
        assert_eq!(fake.routes(), vec![route, route]);
    }

    #[tokio::test]
    async fn test_move_repopulates_from_server() {
        let (controller, fake, sink) = controller();
        fake.respond("PUT /wishlists/A/items/5/move-to/B", 200, item("5", "B"));
        controller.edit(|form| form.wishlist_id = "A".to_string());
        controller.edit_inputs(|inputs| {
            inputs.move_source_wishlist_id = "A".to_string();
            inputs.move_target_wishlist_id = "B".to_string();
            inputs.move_item_id = "5".to_string();
        });

        let _ = controller.move_to_wishlist().await;

        assert_eq!(fake.routes(), vec!["PUT /wishlists/A/items/5/move-to/B"]);
        assert_eq!(fake.requests()[0].body, None);
        assert_eq!(controller.form().wishlist_id, "B");
        assert_eq!(
            sink.current(),
            Some(Notification::success(
                "Item has been successfully moved to target wishlist"
            ))
        );
    }

    #[tokio::test]
    async fn test_move_failure_clears_form() {
        let (controller, fake, sink) = controller();
        fake.respond(
            "PUT /wishlists/A/items/5/move-to/B",
            404,
            json!({"message": "Wishlist B not found"}),
        );
        controller.edit(|form| {
            form.id = "5".to_string();
            form.wishlist_id = "A".to_string();
        });
        controller.edit_inputs(|inputs| {
            inputs.move_source_wishlist_id = "A".to_string();
            inputs.move_target_wishlist_id = "B".to_string();
            inputs.move_item_id = "5".to_string();
        });

        let _ = controller.move_to_wishlist().await;

        assert_eq!(controller.form(), ItemForm::default());
        assert_eq!(controller.inputs().move_target_wishlist_id, "B");
        assert_eq!(sink.current(), Some(Notification::error("Wishlist B not found")));
    }

    #[tokio::test]
    async fn test_retrieve_failure_without_message() {
        let (controller, fake, sink) = controller();
        fake.respond_empty("GET /wishlists/A/items/5", 500);
        controller.edit(|form| {
            form.id = "5".to_string();
            form.wishlist_id = "A".to_string();
        });

        let _ = controller.retrieve().await;

        assert_eq!(controller.form(), ItemForm::default());
        assert_eq!(sink.current(), Some(Notification::error("Server error!")));
    }

    #[tokio::test]
    async fn test_update_sends_nan_price_as_null() {
        let (controller, fake, _sink) = controller();
        fake.respond("PUT /wishlists/A/items/5", 400, json!({"message": "Invalid price"}));
        controller.edit(|form| {
            form.id = "5".to_string();
            form.wishlist_id = "A".to_string();
            form.price = "a lot".to_string();
        });

        let _ = controller.update().await;

        let body = fake.requests()[0].body.clone().unwrap();
        assert!(body["price"].is_null());
        assert_eq!(controller.form().price, "a lot");
    }
}
