//! Requests as handlers see them.
//!
//! A [`Request`] is built from raw parts by the server (or a test), then the
//! router attaches the `{name}` captures of the matched route.

mod parsing;

use parsing::parse_query_string;
pub use parsing::{DecodeError, url_decode};

use crate::constants::MAX_HEADER_VALUE_LEN;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl Method {
    const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Name as it appears on the request line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Look a method up by name, ignoring ASCII case. `None` for anything
    /// outside the seven above.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An incoming request.
///
/// ```
/// use trivia_api::{Method, Request};
///
/// let req = Request::new(
///     Method::Post,
///     "/search_questions?page=2".to_string(),
///     vec![("Content-Type".to_string(), "application/json".to_string())],
///     Some(br#"{"searchTerm":"title"}"#.to_vec()),
/// );
/// assert_eq!(req.route_path(), "/search_questions");
/// assert_eq!(req.query("page"), Some("2"));
/// assert_eq!(req.header("content-type"), Some("application/json"));
/// ```
#[non_exhaustive]
pub struct Request {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    params: HashMap<String, String>,
    // Filled on the first `query` call
    query: OnceCell<HashMap<String, String>>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Body bytes stay out of logs
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("body_len", &self.body.as_ref().map_or(0, Vec::len))
            .finish_non_exhaustive()
    }
}

impl Request {
    /// Assemble a request. Header values over
    /// [`MAX_HEADER_VALUE_LEN`](crate::constants::MAX_HEADER_VALUE_LEN) bytes
    /// are dropped with a warning.
    #[must_use]
    pub fn new(
        method: Method,
        path: String,
        mut headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Self {
        let before = headers.len();
        headers.retain(|(_, value)| value.len() <= MAX_HEADER_VALUE_LEN);
        if headers.len() < before {
            crate::log_warn!(
                "dropped {} header(s) longer than {} bytes",
                before - headers.len(),
                MAX_HEADER_VALUE_LEN
            );
        }

        Self {
            method,
            path,
            headers,
            body,
            params: HashMap::new(),
            query: OnceCell::new(),
        }
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Request method.
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target as received, query string included.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The part of the target routes are matched against.
    pub fn route_path(&self) -> &str {
        self.path.split('?').next().unwrap_or_default()
    }

    /// `{name}` capture of the matched route.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Decoded query value; the first occurrence wins.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .get_or_init(|| self.parse_query())
            .get(name)
            .map(String::as_str)
    }

    /// First header named `name`, compared without ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body bytes, if any were sent.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Run `parse` over the body. `None` without a body.
    ///
    /// ```
    /// use trivia_api::{Method, Request, json};
    ///
    /// let req = Request::new(Method::Post, "/quizzes".into(), vec![], Some(b"{\"quiz_category\":null}".to_vec()));
    /// let body = req.json_with(json::try_parse).unwrap();
    /// assert!(body.get("quiz_category").is_null());
    /// ```
    #[must_use]
    pub fn json_with<T>(&self, parse: impl FnOnce(&[u8]) -> Option<T>) -> Option<T> {
        self.body().and_then(parse)
    }

    fn parse_query(&self) -> HashMap<String, String> {
        let Some((_, query)) = self.path.split_once('?') else {
            return HashMap::new();
        };
        let parsed = parse_query_string(query);
        if parsed.dropped > 0 {
            crate::log_warn!(
                "ignored {} query parameter(s) on {}",
                parsed.dropped,
                self.route_path()
            );
        }
        parsed.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> Request {
        Request::new(Method::Get, path.to_string(), vec![], None)
    }

    #[test]
    fn test_accessors() {
        let req = Request::new(
            Method::Delete,
            "/questions/12?page=2".to_string(),
            vec![],
            None,
        )
        .with_params(HashMap::from([("id".to_string(), "12".to_string())]));

        assert_eq!(req.method(), Method::Delete);
        assert_eq!(req.path(), "/questions/12?page=2");
        assert_eq!(req.route_path(), "/questions/12");
        assert_eq!(req.param("id"), Some("12"));
        assert_eq!(req.param("page"), None);
        assert_eq!(req.query("page"), Some("2"));
        assert!(req.body().is_none());
    }

    #[test]
    fn test_query_first_value_wins() {
        let req = get("/questions?page=3&page=4&q=what+is%3F");
        assert_eq!(req.query("page"), Some("3"));
        assert_eq!(req.query("q"), Some("what is?"));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn test_without_query_string() {
        let req = get("/categories");
        assert_eq!(req.route_path(), "/categories");
        assert_eq!(req.query("page"), None);
        assert_eq!(get("/").route_path(), "/");
    }

    #[test]
    fn test_header_lookup() {
        let req = Request::new(
            Method::Post,
            "/quizzes".to_string(),
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("X-Big".to_string(), "x".repeat(MAX_HEADER_VALUE_LEN + 1)),
            ],
            Some(Vec::new()),
        );
        assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(req.header("x-big"), None);
        assert_eq!(req.body(), Some(&b""[..]));
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(Method::parse("get"), Some(Method::Get));
        assert_eq!(Method::parse("DELETE"), Some(Method::Delete));
        assert_eq!(Method::parse("Options"), Some(Method::Options));
        assert_eq!(Method::parse("TRACE"), None);
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_debug_hides_body() {
        let req = Request::new(Method::Post, "/questions".to_string(), vec![], Some(b"secret".to_vec()));
        let debug = format!("{req:?}");
        assert!(debug.contains("/questions"));
        assert!(debug.contains("body_len: 6"));
        assert!(!debug.contains("secret"));
    }
}
