//! Request builder.
//!
//! Pure functions that turn the current view model into an [`ApiRequest`]:
//! a method, a path under the service base URL, an optional query and an
//! optional JSON body. Nothing here performs I/O.
//!
//! Paths are relative to the configured API URL, e.g. `/wishlists/7`.

pub mod item;
mod query;
pub mod wishlist;

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub use query::QueryParams;

/// HTTP verbs used by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local validation failures, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Items always belong to a wishlist.
    #[error("Wishlist ID cannot be empty")]
    MissingWishlistId,
}

/// A fully described call against the wishlist service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path below the base URL, already percent-encoded.
    pub path: String,
    /// Filters; an empty set sends no query string.
    pub query: QueryParams,
    /// JSON body, if the verb carries one.
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub const fn new(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            query: QueryParams::new(),
            body: None,
        }
    }

    #[must_use]
    pub const fn get(path: String) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    #[must_use]
    pub const fn post(path: String) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    #[must_use]
    pub const fn put(path: String) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    #[must_use]
    pub const fn delete(path: String) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach query filters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Path plus query string, e.g. `/wishlists?customer_id=42`.
    #[must_use]
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.encode())
        }
    }
}

/// Percent-encode one dynamic path segment.
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
