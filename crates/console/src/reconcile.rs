//! Response reconciler.
//!
//! Applies the outcome of one action to a view and produces the single
//! notification the action settles with. Each action declares a [`Plan`]:
//! what a success does to the view, and what a failure does.
//!
//! Reconciliation is all-or-nothing. The replacement form and table are
//! built completely before anything is written, so a payload that cannot be
//! mapped leaves the view exactly as it was.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use wishlist_console_core::DateError;

use crate::notification::Notification;
use crate::resource::Resource;
use crate::table::ResultTable;
use crate::transport::{ApiResponse, TransportError};
use crate::view::ResourceView;

/// What a transport call produced.
pub type Outcome = Result<ApiResponse, TransportError>;

/// Message for successful retrieve, update and search.
pub const SUCCESS: &str = "Success";

/// Message when a failure carries no usable `message`.
pub const GENERIC_FAILURE: &str = "Server error!";

/// Effect of a 2xx response. Each variant carries the success message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnSuccess {
    /// Replace the form with the returned entity.
    Populate(&'static str),
    /// Render the returned list, then promote its first entity.
    List(&'static str),
    /// Clear the form.
    Clear(&'static str),
}

/// Effect of a failed response or transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Report the server message, keep the form.
    Report,
    /// Clear the form, then report the server message.
    ClearAndReport,
    /// Report a fixed message regardless of the payload.
    Fixed(&'static str),
}

/// How one action reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub on_success: OnSuccess,
    pub on_failure: OnFailure,
}

impl Plan {
    #[must_use]
    pub const fn new(on_success: OnSuccess, on_failure: OnFailure) -> Self {
        Self {
            on_success,
            on_failure,
        }
    }
}

/// A success payload that could not be applied to the view.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Invalid {field} in response: {source}")]
    Date {
        field: &'static str,
        source: DateError,
    },

    #[error("Unexpected response from server: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Empty response from server")]
    MissingBody,
}

/// Apply `outcome` to `view` according to `plan`.
///
/// Returns the notification the action settles with. Never panics on a
/// malformed payload.
pub fn reconcile<R: Resource>(
    view: &mut ResourceView<R>,
    plan: Plan,
    outcome: Outcome,
) -> Notification {
    match outcome {
        Ok(response) if response.is_success() => {
            match apply_success(view, plan.on_success, response.body) {
                Ok(message) => Notification::success(message),
                Err(e) => {
                    warn!(resource = R::LABEL, error = %e, "Response could not be reconciled");
                    Notification::error(e.to_string())
                }
            }
        }
        Ok(response) => {
            debug!(resource = R::LABEL, status = response.status, "Service reported failure");
            apply_failure(view, plan.on_failure, Some(&response))
        }
        Err(e) => {
            warn!(resource = R::LABEL, error = %e, "Request failed");
            apply_failure(view, plan.on_failure, None)
        }
    }
}

/// The text shown for a failed response: its `message` field, or
/// [`GENERIC_FAILURE`] when there is none.
#[must_use]
pub fn failure_message(response: Option<&ApiResponse>) -> String {
    response
        .and_then(ApiResponse::message)
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}

fn apply_success<R: Resource>(
    view: &mut ResourceView<R>,
    on_success: OnSuccess,
    body: Option<Value>,
) -> Result<&'static str, ReconcileError> {
    match on_success {
        OnSuccess::Populate(message) => {
            let entity: R::Entity = serde_json::from_value(body.ok_or(ReconcileError::MissingBody)?)?;
            view.form = R::to_form(&entity)?;
            Ok(message)
        }
        OnSuccess::List(message) => {
            let entities: Vec<R::Entity> =
                serde_json::from_value(body.ok_or(ReconcileError::MissingBody)?)?;

            let promoted = entities.first().map(R::to_form).transpose()?;

            let mut table = ResultTable::new(R::columns());
            for entity in &entities {
                table.push_row(R::row(entity));
            }

            debug!(resource = R::LABEL, rows = table.len(), "Search results rendered");
            view.results = table;
            if let Some(form) = promoted {
                view.form = form;
            }
            Ok(message)
        }
        OnSuccess::Clear(message) => {
            view.form = R::Form::default();
            Ok(message)
        }
    }
}

fn apply_failure<R: Resource>(
    view: &mut ResourceView<R>,
    on_failure: OnFailure,
    response: Option<&ApiResponse>,
) -> Notification {
    match on_failure {
        OnFailure::Report => Notification::error(failure_message(response)),
        OnFailure::ClearAndReport => {
            view.form = R::Form::default();
            Notification::error(failure_message(response))
        }
        OnFailure::Fixed(message) => Notification::error(message),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::notification::Severity;
    use crate::resource::{ItemResource, WishlistResource};
    use crate::view::{ItemForm, ItemInputs, WishlistForm};

    const POPULATE: Plan = Plan::new(OnSuccess::Populate(SUCCESS), OnFailure::Report);
    const SEARCH: Plan = Plan::new(OnSuccess::List(SUCCESS), OnFailure::Report);

    fn ok(status: u16, body: Value) -> Outcome {
        Ok(ApiResponse::new(status, Some(body)))
    }

    fn loaded_view() -> ResourceView<WishlistResource> {
        ResourceView {
            form: WishlistForm {
                id: "1".to_string(),
                customer_id: "9".to_string(),
                name: "Old".to_string(),
                created_date: "2020-01-01".to_string(),
                modified_date: "2020-01-02".to_string(),
            },
            ..ResourceView::default()
        }
    }

    #[test]
    fn test_populate_overwrites_every_field() {
        let mut view = loaded_view();
        let note = reconcile(
            &mut view,
            POPULATE,
            ok(
                200,
                json!({
                    "id": 7,
                    "customer_id": "42",
                    "name": "Birthday",
                    "created_date": "2024-10-15T23:59:59Z",
                    "modified_date": "Wed, 16 Oct 2024 00:00:00 GMT"
                }),
            ),
        );

        assert_eq!(note, Notification::success("Success"));
        assert_eq!(view.form.id, "7");
        assert_eq!(view.form.created_date, "2024-10-15");
        assert_eq!(view.form.modified_date, "2024-10-16");
    }

    #[test]
    fn test_bad_date_leaves_form_untouched() {
        let mut view = loaded_view();
        let before = view.clone();
        let note = reconcile(
            &mut view,
            POPULATE,
            ok(200, json!({"id": 7, "customer_id": "42", "name": "x", "created_date": "later"})),
        );

        assert_eq!(note.severity, Severity::Error);
        assert!(note.message.contains("created_date"), "{}", note.message);
        assert_eq!(view, before);
    }

    #[test]
    fn test_wrong_shape_is_reported_not_panicked() {
        let mut view = loaded_view();
        let before = view.clone();
        let note = reconcile(&mut view, POPULATE, ok(200, json!("nope")));
        assert!(note.is_error());
        assert_eq!(view, before);

        let note = reconcile(&mut view, SEARCH, Ok(ApiResponse::new(200, None)));
        assert_eq!(note, Notification::error("Empty response from server"));
        assert_eq!(view, before);
    }

    #[test]
    fn test_search_renders_rows_in_server_order_and_promotes_first() {
        let mut view = loaded_view();
        let note = reconcile(
            &mut view,
            SEARCH,
            ok(
                200,
                json!([
                    {"id": 3, "customer_id": "42", "name": "Zeta"},
                    {"id": 1, "customer_id": "42", "name": "Alpha"}
                ]),
            ),
        );

        assert_eq!(note, Notification::success("Success"));
        assert_eq!(view.results.len(), 2);
        assert_eq!(view.results.cell(0, "name"), Some("Zeta"));
        assert_eq!(view.results.cell(1, "name"), Some("Alpha"));
        assert_eq!(view.form.id, "3");
        assert_eq!(view.form.created_date, "");
    }

    #[test]
    fn test_empty_search_clears_table_and_keeps_form() {
        let mut view = loaded_view();
        view.results = ResultTable::new(WishlistResource::columns());
        view.results.push_row(vec!["1".to_string()]);
        let form = view.form.clone();

        let note = reconcile(&mut view, SEARCH, ok(200, json!([])));

        assert_eq!(note, Notification::success("Success"));
        assert!(view.results.is_displayed());
        assert!(view.results.is_empty());
        assert_eq!(view.form, form);
    }

    #[test]
    fn test_clear_on_success_resets_item_dates() {
        let mut view: ResourceView<ItemResource> = ResourceView {
            form: ItemForm {
                id: "5".to_string(),
                wishlist_id: "A".to_string(),
                added_date: "2024-10-15".to_string(),
                modified_date: "2024-10-16".to_string(),
                ..ItemForm::default()
            },
            inputs: ItemInputs {
                sort_by: "price".to_string(),
                ..ItemInputs::default()
            },
            ..ResourceView::default()
        };

        let plan = Plan::new(OnSuccess::Clear(SUCCESS), OnFailure::Fixed(GENERIC_FAILURE));
        let note = reconcile(&mut view, plan, Ok(ApiResponse::new(204, None)));

        assert_eq!(note, Notification::success("Success"));
        assert_eq!(view.form, ItemForm::default());
        assert_eq!(view.inputs.sort_by, "price");
    }

    #[test]
    fn test_failure_policies() {
        let not_found = || ok(404, json!({"message": "Wishlist 7 not found"}));

        let mut view = loaded_view();
        let note = reconcile(&mut view, POPULATE, not_found());
        assert_eq!(note, Notification::error("Wishlist 7 not found"));
        assert_eq!(view.form.id, "1");

        let clearing = Plan::new(OnSuccess::Populate(SUCCESS), OnFailure::ClearAndReport);
        let note = reconcile(&mut view, clearing, not_found());
        assert_eq!(note, Notification::error("Wishlist 7 not found"));
        assert_eq!(view.form, WishlistForm::default());

        let mut view = loaded_view();
        let fixed = Plan::new(OnSuccess::Clear("Deleted"), OnFailure::Fixed(GENERIC_FAILURE));
        let note = reconcile(&mut view, fixed, not_found());
        assert_eq!(note, Notification::error("Server error!"));
        assert_eq!(view.form.id, "1");
    }

    #[test]
    fn test_failure_without_message_uses_generic_text() {
        let mut view = loaded_view();
        let note = reconcile(&mut view, POPULATE, ok(500, json!({"error": "boom"})));
        assert_eq!(note, Notification::error(GENERIC_FAILURE));

        let note = reconcile(&mut view, POPULATE, Ok(ApiResponse::new(502, None)));
        assert_eq!(note, Notification::error(GENERIC_FAILURE));

        let note = reconcile(
            &mut view,
            POPULATE,
            Err(TransportError::Request("connection refused".to_string())),
        );
        assert_eq!(note, Notification::error(GENERIC_FAILURE));
    }
}
