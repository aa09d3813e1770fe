//! Limits, header names and status wording.
//!
//! `TRIVIA_MAX_JSON_SIZE` overrides the JSON parse limit (default 1,000,000
//! bytes). The server's body limit is separate and comes from
//! [`Config`](crate::Config).

use std::sync::OnceLock;

const DEFAULT_MAX_JSON_SIZE: usize = 1_000_000;

static MAX_JSON_SIZE: OnceLock<usize> = OnceLock::new();

/// Largest JSON document [`json::try_parse`](crate::json::try_parse) accepts.
///
/// Read from the environment on first use.
pub fn max_json_size() -> usize {
    *MAX_JSON_SIZE.get_or_init(|| {
        std::env::var("TRIVIA_MAX_JSON_SIZE")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_MAX_JSON_SIZE)
    })
}

/// Deepest array/object nesting a request body may use.
pub const MAX_JSON_DEPTH: usize = 20;

/// Body limit used when the configuration names none.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1 << 20;

/// Longest decoded query key or value.
pub const MAX_URL_DECODED_LEN: usize = 64 * 1024;

/// Distinct query keys kept per request; later ones are ignored.
pub const MAX_QUERY_PARAMS: usize = 100;

/// Header values longer than this are dropped.
pub const MAX_HEADER_VALUE_LEN: usize = 8 * 1024;

/// `Content-Type`. Request header lookups ignore case.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Media type of success bodies.
pub const MIME_JSON: &str = "application/json";

/// Media type of RFC 7807 error bodies.
pub const MIME_PROBLEM_JSON: &str = "application/problem+json";

/// `detail` of every 422 response. The cause goes to the error log only.
pub const UNPROCESSABLE_DETAIL: &str = "the request could not be completed";

/// Sent with every response, including errors and preflights.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
    ("Access-Control-Allow-Methods", "GET, PUT, POST, DELETE, OPTIONS"),
];

/// Reason phrase for the statuses the service answers with.
///
/// ```
/// use trivia_api::constants::status_title;
///
/// assert_eq!(status_title(404), "Not Found");
/// assert_eq!(status_title(422), "Unprocessable Entity");
/// assert_eq!(status_title(999), "Error");
/// ```
pub const fn status_title(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Error",
    }
}

/// `message` member of an error body.
pub const fn status_message(code: u16) -> &'static str {
    match code {
        400 => "Bad request.",
        404 => "Resource is not found.",
        405 => "Method not allowed.",
        413 => "Payload too large.",
        422 => "Unprocessable.",
        500 => "Internal server error.",
        _ => "Error.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_status_has_title_and_message() {
        for code in [400, 404, 405, 413, 422, 500] {
            assert_ne!(status_title(code), "Error", "{code}");
            assert_ne!(status_message(code), "Error.", "{code}");
        }
    }

    #[test]
    fn test_max_json_size_default() {
        // Never set by the test suite
        assert_eq!(max_json_size(), DEFAULT_MAX_JSON_SIZE);
    }

    #[test]
    fn test_cors_allows_every_routed_method() {
        let (_, methods) = CORS_HEADERS[2];
        for method in ["GET", "POST", "DELETE", "OPTIONS"] {
            assert!(methods.contains(method), "{method}");
        }
    }
}
