//! In-memory stand-in for the wishlist REST service.
//!
//! Serves the documented endpoints under `/api` with the same status codes
//! and `{"message": ...}` error bodies as the real service. Every request is
//! recorded so tests can assert on the exact method, path and query sent.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// A wishlist as stored by the stub.
#[derive(Debug, Clone)]
pub struct StoredWishlist {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub created_date: String,
    pub modified_date: String,
}

/// An item as stored by the stub.
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub id: String,
    pub wishlist_id: String,
    pub product_id: String,
    pub description: String,
    pub price: f64,
    pub added_date: String,
    pub modified_date: String,
}

#[derive(Debug, Default)]
struct Store {
    wishlists: Vec<StoredWishlist>,
    items: Vec<StoredItem>,
    requests: Vec<String>,
}

/// Shared handle to the stub's data.
#[derive(Debug, Clone, Default)]
pub struct StubState {
    store: Arc<Mutex<Store>>,
}

impl StubState {
    /// `"METHOD /path?query"` of every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// All stored wishlists in creation order.
    #[must_use]
    pub fn wishlists(&self) -> Vec<StoredWishlist> {
        self.lock().wishlists.clone()
    }

    /// All stored items in creation order.
    #[must_use]
    pub fn items(&self) -> Vec<StoredItem> {
        self.lock().items.clone()
    }

    /// Store a wishlist directly and return its id.
    pub fn seed_wishlist(&self, customer_id: &str, name: &str) -> String {
        let wishlist = new_wishlist(customer_id, name);
        let id = wishlist.id.clone();
        self.lock().wishlists.push(wishlist);
        id
    }

    /// Store an item directly and return its id.
    pub fn seed_item(&self, wishlist_id: &str, product_id: &str, price: f64) -> String {
        let today = Utc::now().date_naive().to_string();
        let item = StoredItem {
            id: Uuid::new_v4().to_string(),
            wishlist_id: wishlist_id.to_string(),
            product_id: product_id.to_string(),
            description: format!("Product {product_id}"),
            price,
            added_date: today.clone(),
            modified_date: today,
        };
        let id = item.id.clone();
        self.lock().items.push(item);
        id
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A running stub bound to a local ephemeral port.
///
/// The server task is aborted when the handle is dropped.
#[derive(Debug)]
pub struct StubServer {
    addr: SocketAddr,
    state: StubState,
    task: JoinHandle<()>,
}

impl StubServer {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = StubState::default();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = router(state.clone());
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Stub server stopped");
            }
        });

        tracing::debug!(%addr, "Stub wishlist service listening");
        Ok(Self { addr, state, task })
    }

    /// Base URL to configure the console with.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    #[must_use]
    pub const fn state(&self) -> &StubState {
        &self.state
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Build the stub router.
pub fn router(state: StubState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/wishlists", get(list_wishlists).post(create_wishlist))
        .route(
            "/wishlists/{wishlist_id}",
            get(read_wishlist).put(update_wishlist).delete(delete_wishlist),
        )
        .route(
            "/wishlists/customers/{customer_id}",
            delete(delete_customer_wishlists),
        )
        .route(
            "/wishlists/{wishlist_id}/items",
            get(list_items).post(create_item),
        )
        .route(
            "/wishlists/{wishlist_id}/items/{item_id}",
            get(read_item).put(update_item).delete(delete_item),
        )
        .route(
            "/wishlists/{source_id}/items/{item_id}/move-to/{target_id}",
            put(move_item),
        );

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<StubState>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri());
    state.lock().requests.push(line);
    next.run(request).await
}

/// Errors in the service's JSON shape.
#[derive(Debug)]
enum StubError {
    NotFound(String),
    Forbidden(String),
    BadRequest(String),
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m),
            Self::Forbidden(m) => (StatusCode::FORBIDDEN, m),
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
        };
        (status, Json(json!({"status": status.as_u16(), "message": message}))).into_response()
    }
}

type StubResult<T> = Result<T, StubError>;

async fn health() -> Json<Value> {
    Json(json!({"status": 200, "message": "Healthy"}))
}

// =============================================================================
// Wishlists
// =============================================================================

#[derive(Debug, Deserialize)]
struct WishlistFilter {
    customer_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WishlistPayload {
    #[serde(default)]
    customer_id: String,
    #[serde(default)]
    name: String,
}

async fn list_wishlists(
    State(state): State<StubState>,
    Query(filter): Query<WishlistFilter>,
) -> Json<Vec<Value>> {
    let store = state.lock();
    let found = store
        .wishlists
        .iter()
        .filter(|w| filter.customer_id.as_ref().is_none_or(|c| &w.customer_id == c))
        .filter(|w| filter.name.as_ref().is_none_or(|n| &w.name == n))
        .map(|w| wishlist_json(w, &store.items))
        .collect();
    drop(store);
    Json(found)
}

async fn create_wishlist(
    State(state): State<StubState>,
    Json(payload): Json<WishlistPayload>,
) -> StubResult<(StatusCode, Json<Value>)> {
    validate_wishlist(&payload)?;
    let wishlist = new_wishlist(&payload.customer_id, &payload.name);
    let mut store = state.lock();
    let body = wishlist_json(&wishlist, &store.items);
    store.wishlists.push(wishlist);
    drop(store);
    Ok((StatusCode::CREATED, Json(body)))
}

async fn read_wishlist(
    State(state): State<StubState>,
    Path(wishlist_id): Path<String>,
) -> StubResult<Json<Value>> {
    let store = state.lock();
    let body = wishlist_json(find_wishlist(&store, &wishlist_id)?, &store.items);
    drop(store);
    Ok(Json(body))
}

async fn update_wishlist(
    State(state): State<StubState>,
    Path(wishlist_id): Path<String>,
    Json(payload): Json<WishlistPayload>,
) -> StubResult<Json<Value>> {
    validate_wishlist(&payload)?;
    let mut store = state.lock();
    let wishlist = store
        .wishlists
        .iter_mut()
        .find(|w| w.id == wishlist_id)
        .ok_or_else(|| wishlist_not_found(&wishlist_id))?;
    wishlist.customer_id = payload.customer_id;
    wishlist.name = payload.name;
    wishlist.modified_date = timestamp();
    let updated = wishlist.clone();
    let body = wishlist_json(&updated, &store.items);
    drop(store);
    Ok(Json(body))
}

async fn delete_wishlist(
    State(state): State<StubState>,
    Path(wishlist_id): Path<String>,
) -> StatusCode {
    let mut store = state.lock();
    store.wishlists.retain(|w| w.id != wishlist_id);
    store.items.retain(|i| i.wishlist_id != wishlist_id);
    drop(store);
    StatusCode::NO_CONTENT
}

async fn delete_customer_wishlists(
    State(state): State<StubState>,
    Path(customer_id): Path<String>,
) -> StubResult<StatusCode> {
    let mut store = state.lock();
    let owned: Vec<String> = store
        .wishlists
        .iter()
        .filter(|w| w.customer_id == customer_id)
        .map(|w| w.id.clone())
        .collect();
    if owned.is_empty() {
        drop(store);
        return Err(StubError::NotFound(format!(
            "No wishlists found for customer '{customer_id}'."
        )));
    }
    store.wishlists.retain(|w| w.customer_id != customer_id);
    store.items.retain(|i| !owned.contains(&i.wishlist_id));
    drop(store);
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Items
// =============================================================================

#[derive(Debug, Deserialize)]
struct ItemFilter {
    price: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemPayload {
    #[serde(default)]
    product_id: String,
    price: Option<f64>,
    #[serde(default)]
    description: String,
}

async fn list_items(
    State(state): State<StubState>,
    Path(wishlist_id): Path<String>,
    Query(filter): Query<ItemFilter>,
) -> StubResult<Json<Vec<Value>>> {
    let store = state.lock();
    find_wishlist(&store, &wishlist_id)?;

    let price = filter
        .price
        .as_deref()
        .map(|p| {
            p.parse::<f64>()
                .map_err(|_| StubError::BadRequest(format!("Invalid price filter '{p}'.")))
        })
        .transpose()?;

    let mut items: Vec<&StoredItem> = store
        .items
        .iter()
        .filter(|i| i.wishlist_id == wishlist_id)
        .filter(|i| price.is_none_or(|p| (i.price - p).abs() < f64::EPSILON))
        .collect();

    if filter.sort_by.as_deref() == Some("price") {
        items.sort_by(|a, b| a.price.total_cmp(&b.price));
        if filter.order.as_deref() == Some("desc") {
            items.reverse();
        }
    }

    let body: Vec<Value> = items.into_iter().map(item_json).collect();
    drop(store);
    Ok(Json(body))
}

async fn create_item(
    State(state): State<StubState>,
    Path(wishlist_id): Path<String>,
    Json(payload): Json<ItemPayload>,
) -> StubResult<(StatusCode, Json<Value>)> {
    let price = validate_item(&payload)?;
    let mut store = state.lock();
    find_wishlist(&store, &wishlist_id)?;

    let today = Utc::now().date_naive().to_string();
    let item = StoredItem {
        id: Uuid::new_v4().to_string(),
        wishlist_id,
        product_id: payload.product_id,
        description: payload.description,
        price,
        added_date: today.clone(),
        modified_date: today,
    };
    let body = item_json(&item);
    store.items.push(item);
    drop(store);
    Ok((StatusCode::CREATED, Json(body)))
}

async fn read_item(
    State(state): State<StubState>,
    Path((wishlist_id, item_id)): Path<(String, String)>,
) -> StubResult<Json<Value>> {
    let store = state.lock();
    find_wishlist(&store, &wishlist_id)?;
    let item = store
        .items
        .iter()
        .find(|i| i.id == item_id && i.wishlist_id == wishlist_id)
        .ok_or_else(|| item_not_found(&item_id, &wishlist_id))?;
    let body = item_json(item);
    drop(store);
    Ok(Json(body))
}

async fn update_item(
    State(state): State<StubState>,
    Path((_wishlist_id, item_id)): Path<(String, String)>,
    Json(payload): Json<ItemPayload>,
) -> StubResult<Json<Value>> {
    let price = validate_item(&payload)?;
    let mut store = state.lock();
    let item = store
        .items
        .iter_mut()
        .find(|i| i.id == item_id)
        .ok_or_else(|| StubError::NotFound(format!("Item with id '{item_id}' was not found.")))?;
    item.product_id = payload.product_id;
    item.description = payload.description;
    item.price = price;
    item.modified_date = Utc::now().date_naive().to_string();
    let body = item_json(item);
    drop(store);
    Ok(Json(body))
}

async fn delete_item(
    State(state): State<StubState>,
    Path((_wishlist_id, item_id)): Path<(String, String)>,
) -> StatusCode {
    state.lock().items.retain(|i| i.id != item_id);
    StatusCode::NO_CONTENT
}

async fn move_item(
    State(state): State<StubState>,
    Path((source_id, item_id, target_id)): Path<(String, String, String)>,
) -> StubResult<Json<Value>> {
    let mut store = state.lock();
    let source = store
        .wishlists
        .iter()
        .find(|w| w.id == source_id)
        .ok_or_else(|| {
            StubError::NotFound(format!(
                "Source wishlist with id '{source_id}' could not be found."
            ))
        })?;
    let target = store
        .wishlists
        .iter()
        .find(|w| w.id == target_id)
        .ok_or_else(|| {
            StubError::NotFound(format!(
                "Target wishlist with id '{target_id}' could not be found."
            ))
        })?;
    if source.customer_id != target.customer_id {
        return Err(StubError::Forbidden(
            "Wishlists belong to different customers.".to_string(),
        ));
    }

    let item = store
        .items
        .iter_mut()
        .find(|i| i.id == item_id && i.wishlist_id == source_id)
        .ok_or_else(|| item_not_found(&item_id, &source_id))?;
    item.wishlist_id = target_id;
    let body = item_json(item);
    drop(store);
    Ok(Json(body))
}

// =============================================================================
// Helpers
// =============================================================================

fn new_wishlist(customer_id: &str, name: &str) -> StoredWishlist {
    let now = timestamp();
    StoredWishlist {
        id: Uuid::new_v4().to_string(),
        customer_id: customer_id.to_string(),
        name: name.to_string(),
        created_date: now.clone(),
        modified_date: now,
    }
}

/// Wishlist timestamps are full RFC 3339 values, items carry plain dates.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn validate_wishlist(payload: &WishlistPayload) -> StubResult<()> {
    if payload.customer_id.is_empty() {
        return Err(StubError::BadRequest(
            "Invalid Wishlist: missing customer_id".to_string(),
        ));
    }
    if payload.name.is_empty() {
        return Err(StubError::BadRequest(
            "Invalid Wishlist: missing name".to_string(),
        ));
    }
    Ok(())
}

fn validate_item(payload: &ItemPayload) -> StubResult<f64> {
    if payload.product_id.is_empty() {
        return Err(StubError::BadRequest(
            "Invalid WishlistItem: missing product_id".to_string(),
        ));
    }
    payload
        .price
        .ok_or_else(|| StubError::BadRequest("Invalid WishlistItem: bad price".to_string()))
}

fn find_wishlist<'a>(store: &'a Store, wishlist_id: &str) -> StubResult<&'a StoredWishlist> {
    store
        .wishlists
        .iter()
        .find(|w| w.id == wishlist_id)
        .ok_or_else(|| wishlist_not_found(wishlist_id))
}

fn wishlist_not_found(wishlist_id: &str) -> StubError {
    StubError::NotFound(format!("Wishlist with id '{wishlist_id}' was not found."))
}

fn item_not_found(item_id: &str, wishlist_id: &str) -> StubError {
    StubError::NotFound(format!(
        "Item with id '{item_id}' was not found in wishlist '{wishlist_id}'."
    ))
}

fn wishlist_json(wishlist: &StoredWishlist, items: &[StoredItem]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .filter(|i| i.wishlist_id == wishlist.id)
        .map(item_json)
        .collect();
    json!({
        "id": wishlist.id,
        "customer_id": wishlist.customer_id,
        "name": wishlist.name,
        "created_date": wishlist.created_date,
        "modified_date": wishlist.modified_date,
        "items": items,
    })
}

fn item_json(item: &StoredItem) -> Value {
    json!({
        "id": item.id,
        "wishlist_id": item.wishlist_id,
        "product_id": item.product_id,
        "description": item.description,
        "price": item.price,
        "added_date": item.added_date,
        "modified_date": item.modified_date,
    })
}
