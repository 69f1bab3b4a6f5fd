//! Resource controllers.
//!
//! One generic [`ResourceController`] drives both resources. Every action
//! runs the same cycle: clear the notification sink, issue a ticket from the
//! resource's request slot, build the request from the current view, send it
//! without holding any lock, then reconcile the outcome if the ticket is
//! still current.
//!
//! Resource-specific actions live in [`wishlist`] and [`item`] as inherent
//! methods on the concrete controller types.

pub mod item;
pub mod wishlist;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument};

use crate::notification::{Notification, NotificationSink};
use crate::reconcile::{reconcile, Outcome, Plan};
use crate::request::{ApiRequest, ValidationError};
use crate::resource::{ItemResource, Resource, WishlistResource};
use crate::slot::{RequestSlot, Ticket};
use crate::table::ResultTable;
use crate::transport::Transport;
use crate::view::ResourceView;

/// Controller for the wishlist form and its result table.
pub type WishlistController<T> = ResourceController<WishlistResource, T>;

/// Controller for the item form, its side inputs and its result table.
pub type ItemController<T> = ResourceController<ItemResource, T>;

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Settled {
    /// The outcome was applied and this notification was set.
    Applied(Notification),
    /// A newer action was triggered first; the response was dropped.
    Stale,
}

impl Settled {
    /// The notification set by this action, if it was applied.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Applied(notification) => Some(notification),
            Self::Stale => None,
        }
    }
}

struct ControllerState<R: Resource> {
    slot: RequestSlot,
    view: ResourceView<R>,
}

/// Keeps one resource's view in sync with the service.
///
/// Clones share the same view, slot, transport and sink.
pub struct ResourceController<R: Resource, T> {
    state: Arc<Mutex<ControllerState<R>>>,
    transport: Arc<T>,
    sink: NotificationSink,
}

impl<R: Resource, T> Clone for ResourceController<R, T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            transport: Arc::clone(&self.transport),
            sink: self.sink.clone(),
        }
    }
}

impl<R: Resource, T> fmt::Debug for ResourceController<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceController")
            .field("resource", &R::LABEL)
            .field("view", &self.lock().view)
            .finish_non_exhaustive()
    }
}

impl<R: Resource, T> ResourceController<R, T> {
    /// Create a controller with an empty view.
    #[must_use]
    pub fn new(transport: Arc<T>, sink: NotificationSink) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                slot: RequestSlot::new(),
                view: ResourceView::default(),
            })),
            transport,
            sink,
        }
    }

    /// Snapshot of the form.
    #[must_use]
    pub fn form(&self) -> R::Form {
        self.lock().view.form.clone()
    }

    /// Snapshot of the side inputs.
    #[must_use]
    pub fn inputs(&self) -> R::Inputs {
        self.lock().view.inputs.clone()
    }

    /// Snapshot of the result table.
    #[must_use]
    pub fn results(&self) -> ResultTable {
        self.lock().view.results.clone()
    }

    /// Snapshot of the whole view.
    #[must_use]
    pub fn view(&self) -> ResourceView<R> {
        self.lock().view.clone()
    }

    /// Edit the form as a user typing into it would.
    pub fn edit(&self, f: impl FnOnce(&mut R::Form)) {
        f(&mut self.lock().view.form);
    }

    /// Edit the side inputs.
    pub fn edit_inputs(&self, f: impl FnOnce(&mut R::Inputs)) {
        f(&mut self.lock().view.inputs);
    }

    /// Clear the notification and every form field. Sets no message.
    ///
    /// Counts as a trigger, so a response still in flight is dropped.
    pub fn clear_form(&self) {
        self.sink.clear();
        {
            let mut state = self.lock();
            state.slot.issue();
            state.view.form = R::Form::default();
        }
        debug!(resource = R::LABEL, "Form cleared");
    }

    /// Drop the rendered result table.
    pub(crate) fn clear_results(&self) {
        self.lock().view.results = ResultTable::default();
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Resource, T: Transport> ResourceController<R, T> {
    /// Run one action with a fixed plan.
    pub(crate) async fn dispatch(
        &self,
        action: &'static str,
        plan: Plan,
        build: impl FnOnce(&ResourceView<R>) -> Result<ApiRequest, ValidationError> + Send,
    ) -> Settled {
        self.dispatch_planned(action, move |view| build(view).map(|request| (plan, request)))
            .await
    }

    /// Run one action end to end.
    ///
    /// `build` sees the view as of the trigger and picks both the request and
    /// how its outcome is reconciled, under the same lock. A validation error
    /// settles the action locally without contacting the service.
    #[instrument(skip_all, fields(resource = R::LABEL, action = action))]
    pub(crate) async fn dispatch_planned(
        &self,
        action: &'static str,
        build: impl FnOnce(&ResourceView<R>) -> Result<(Plan, ApiRequest), ValidationError> + Send,
    ) -> Settled {
        self.sink.clear();

        let (ticket, built) = {
            let mut state = self.lock();
            let ticket = state.slot.issue();
            (ticket, build(&state.view))
        };

        let (plan, request) = match built {
            Ok(planned) => planned,
            Err(e) => {
                debug!(error = %e, "Rejected before sending");
                return self.settle(Notification::error(e.to_string()));
            }
        };

        let outcome = self.transport.send(&request).await;
        self.apply(ticket, plan, outcome)
    }

    fn apply(&self, ticket: Ticket, plan: Plan, outcome: Outcome) -> Settled {
        let notification = {
            let mut state = self.lock();
            if !state.slot.is_current(ticket) {
                debug!("Dropping response superseded by a newer action");
                return Settled::Stale;
            }
            reconcile(&mut state.view, plan, outcome)
        };
        self.settle(notification)
    }

    fn settle(&self, notification: Notification) -> Settled {
        self.sink.set(notification.clone());
        Settled::Applied(notification)
    }
}
