//! JSON parsing and building over miniserde.
//!
//! ```
//! use trivia_api::json::{self, ToJson};
//!
//! let body = json::obj()
//!     .set("success", json::bool(true))
//!     .set("categories", vec!["Science", "Art"].to_json());
//! assert_eq!(body.to_string(), r#"{"categories":["Science","Art"],"success":true}"#);
//!
//! let parsed = json::try_parse(br#"{"searchTerm": "title"}"#).unwrap();
//! assert_eq!(parsed.get("searchTerm").str().as_deref(), Some("title"));
//! ```
//!
//! Objects serialize with their keys in sorted order.

mod builder;
mod to_json;
mod value;

use crate::constants::{MAX_JSON_DEPTH, max_json_size};

pub use builder::{arr, bool, int, null, obj, str};
pub use to_json::ToJson;
pub use value::JsonValue;

/// Whether brackets nest deeper than [`MAX_JSON_DEPTH`], ignoring string contents.
pub(crate) fn json_depth_exceeds_limit(data: &[u8]) -> bool {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escape = false;

    for &byte in data {
        if escape {
            escape = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escape = true,
            b'"' => in_string = !in_string,
            b'[' | b'{' if !in_string => {
                depth += 1;
                if depth > MAX_JSON_DEPTH {
                    return true;
                }
            },
            b']' | b'}' if !in_string => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    false
}

/// Parse a request body.
///
/// Returns `None` when the input is larger than
/// [`max_json_size`](crate::constants::max_json_size), nests deeper than
/// [`MAX_JSON_DEPTH`], is not UTF-8, or is not a single valid JSON value.
#[must_use]
pub fn try_parse(data: &[u8]) -> Option<JsonValue> {
    if data.len() > max_json_size() || json_depth_exceeds_limit(data) {
        return None;
    }
    let text = std::str::from_utf8(data).ok()?;
    miniserde::json::from_str(text).ok().map(JsonValue::new)
}
