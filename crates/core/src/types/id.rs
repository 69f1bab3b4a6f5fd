//! Newtype IDs for type-safe entity references.
//!
//! The wishlist service treats identifiers as opaque values: depending on the
//! backing store they arrive as JSON strings (UUIDs) or JSON numbers. Use the
//! `define_id!` macro to create wrappers that accept either form and always
//! hold the textual representation the console shows in its forms.

use core::fmt;

use serde::Deserializer;
use serde::de::{self, Visitor};

/// Macro to define a type-safe opaque ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` with `#[serde(transparent)]`
/// - `Deserialize` from either a JSON string or a JSON number
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Default`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use wishlist_console_core::define_id;
/// define_id!(ShelfId);
/// define_id!(BinId);
///
/// let shelf_id = ShelfId::new("7");
/// let bin_id = BinId::new("7");
///
/// // These are different types, so this won't compile:
/// // let _: ShelfId = bin_id;
/// assert_eq!(shelf_id.as_str(), bin_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from its textual form.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the textual form of the ID.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::types::id::deserialize_opaque(deserializer).map(Self)
            }
        }
    };
}

// Define standard entity IDs
define_id!(WishlistId);
define_id!(ItemId);
define_id!(CustomerId);
define_id!(ProductId);

/// Deserialize an opaque identifier from a JSON string or number.
///
/// Numbers are rendered the way a browser would print them, so `5` and `5.0`
/// both become `"5"`.
///
/// # Errors
///
/// Returns an error if the value is neither a string nor a number.
#[doc(hidden)]
pub fn deserialize_opaque<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OpaqueIdVisitor)
}

struct OpaqueIdVisitor;

impl Visitor<'_> for OpaqueIdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or numeric identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}
