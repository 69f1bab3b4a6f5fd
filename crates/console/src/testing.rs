//! Scripted transport for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::request::ApiRequest;
use crate::transport::{ApiResponse, Transport, TransportError};

enum Scripted {
    Now(Result<ApiResponse, TransportError>),
    Gated(oneshot::Receiver<()>, Result<ApiResponse, TransportError>),
}

#[derive(Default)]
struct FakeState {
    routes: HashMap<String, VecDeque<Scripted>>,
    requests: Vec<ApiRequest>,
}

/// Transport answering from a script keyed by `"METHOD target"`.
///
/// Unscripted requests get a 404 with a message naming the request.
#[derive(Default)]
pub struct FakeTransport {
    state: Mutex<FakeState>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next matching request with `status` and `body`.
    pub fn respond(&self, route: &str, status: u16, body: Value) {
        self.push(route, Scripted::Now(Ok(ApiResponse::new(status, Some(body)))));
    }

    /// Answer the next matching request with `status` and no body.
    pub fn respond_empty(&self, route: &str, status: u16) {
        self.push(route, Scripted::Now(Ok(ApiResponse::new(status, None))));
    }

    /// Fail the next matching request below HTTP.
    pub fn fail(&self, route: &str, error: TransportError) {
        self.push(route, Scripted::Now(Err(error)));
    }

    /// Hold the next matching request until the returned sender fires.
    pub fn gate(&self, route: &str, status: u16, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(
            route,
            Scripted::Gated(rx, Ok(ApiResponse::new(status, Some(body)))),
        );
        tx
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// `"METHOD target"` of every request sent so far.
    pub fn routes(&self) -> Vec<String> {
        self.lock().requests.iter().map(route_of).collect()
    }

    fn push(&self, route: &str, scripted: Scripted) {
        self.lock()
            .routes
            .entry(route.to_string())
            .or_default()
            .push_back(scripted);
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let route = route_of(request);
        let scripted = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            state.routes.get_mut(&route).and_then(VecDeque::pop_front)
        };

        match scripted {
            Some(Scripted::Now(outcome)) => outcome,
            Some(Scripted::Gated(release, outcome)) => {
                let _ = release.await;
                outcome
            }
            None => Ok(ApiResponse::new(
                404,
                Some(json!({"message": format!("Not scripted: {route}")})),
            )),
        }
    }
}

fn route_of(request: &ApiRequest) -> String {
    format!("{} {}", request.method, request.target())
}
