//! Free-function shorthands used when shaping response bodies.
//!
//! ```
//! use trivia_api::json;
//!
//! let body = json::obj()
//!     .set("deleted", json::int(4))
//!     .set("current_category", json::null());
//! assert_eq!(body.to_string(), r#"{"current_category":null,"deleted":4}"#);
//! ```

use super::value::JsonValue;

/// `{}`
#[must_use]
pub fn obj() -> JsonValue {
    JsonValue::object()
}

/// `[]`
#[must_use]
pub fn arr() -> JsonValue {
    JsonValue::array()
}

/// A JSON string.
#[must_use]
pub fn str(value: impl Into<String>) -> JsonValue {
    JsonValue::from(value.into())
}

/// A JSON integer.
#[must_use]
pub fn int(value: i64) -> JsonValue {
    JsonValue::from(value)
}

/// `true` or `false`.
#[must_use]
pub fn bool(value: bool) -> JsonValue {
    JsonValue::from(value)
}

/// `null`
#[must_use]
pub const fn null() -> JsonValue {
    JsonValue::null()
}
