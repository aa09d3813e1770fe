//! Outgoing responses and the failure-to-status mapping.

use trivia_core::Error;

use crate::constants::{
    CORS_HEADERS, CONTENT_TYPE, MIME_JSON, MIME_PROBLEM_JSON, UNPROCESSABLE_DETAIL,
    status_message, status_title,
};
use crate::json::{self, JsonValue, ToJson};
use crate::status;

/// Status, headers and body of a finished response.
///
/// Success bodies always carry `"success": true`:
///
/// ```
/// use trivia_api::{Response, json};
///
/// let resp = Response::ok(json::obj().set("categories", json::arr()));
/// assert_eq!(resp.status(), 200);
/// assert_eq!(resp.text(), Some(r#"{"categories":[],"success":true}"#));
/// assert_eq!(resp.header("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Response with a JSON body and the given status.
    #[must_use]
    pub fn json(status: u16, body: &JsonValue) -> Self {
        Self {
            status,
            headers: vec![(CONTENT_TYPE.to_string(), MIME_JSON.to_string())],
            body: body.to_bytes(),
        }
    }

    /// 200 with `success: true` added to `body`.
    #[must_use]
    pub fn ok(body: JsonValue) -> Self {
        Self::json(status::OK, &body.set("success", json::bool(true)))
    }

    /// 201 with `success: true` added to `body`.
    #[must_use]
    pub fn created(body: JsonValue) -> Self {
        Self::json(status::CREATED, &body.set("success", json::bool(true)))
    }

    /// 204 without a body.
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            status: status::NO_CONTENT,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// RFC 7807 problem response.
    ///
    /// Besides `type`, `title`, `status` and `detail`, the body carries the
    /// `success: false`, `error` and `message` members the trivia frontend
    /// reads.
    ///
    /// ```
    /// use trivia_api::Response;
    ///
    /// let resp = Response::problem(404, "no questions on page 3");
    /// let body = resp.json_body().unwrap();
    /// assert_eq!(body.get("title").str().as_deref(), Some("Not Found"));
    /// assert_eq!(body.get("error").int(), Some(404));
    /// assert_eq!(body.get("message").str().as_deref(), Some("Resource is not found."));
    /// assert_eq!(body.get("success").bool(), Some(false));
    /// ```
    #[must_use]
    pub fn problem(status: u16, detail: &str) -> Self {
        let body = json::obj()
            .set("type", json::str("about:blank"))
            .set("title", json::str(status_title(status)))
            .set("status", status.to_json())
            .set("detail", json::str(detail))
            .set("success", json::bool(false))
            .set("error", status.to_json())
            .set("message", json::str(status_message(status)));
        Self {
            status,
            headers: vec![(
                CONTENT_TYPE.to_string(),
                MIME_PROBLEM_JSON.to_string(),
            )],
            body: body.to_bytes(),
        }
    }

    /// Problem response for a service failure.
    ///
    /// [`Error::Exhausted`] only reaches here when a handler does not treat
    /// it as the end of a quiz, so it maps to 404. An
    /// [`Error::Unprocessable`] cause can carry store internals and is
    /// replaced by [`UNPROCESSABLE_DETAIL`].
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let detail = match err {
            Error::Unprocessable { .. } => UNPROCESSABLE_DETAIL,
            _ => err.message(),
        };
        Self::problem(status_for(err), detail)
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Add the CORS headers every response carries.
    #[must_use]
    pub fn with_cors(mut self) -> Self {
        for (name, value) in CORS_HEADERS {
            if self.header(name).is_none() {
                self.headers.push((name.to_string(), value.to_string()));
            }
        }
        self
    }

    /// Status code.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Headers in insertion order.
    #[inline]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value, ignoring name case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body bytes.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Body parsed as JSON.
    pub fn json_body(&self) -> Option<JsonValue> {
        json::try_parse(&self.body)
    }

    /// Split into status, headers and body.
    pub fn into_parts(self) -> (u16, Vec<(String, String)>, Vec<u8>) {
        (self.status, self.headers, self.body)
    }
}

/// Status code for a service failure.
pub const fn status_for(err: &Error) -> u16 {
    match err {
        Error::BadRequest { .. } => status::BAD_REQUEST,
        Error::Unprocessable { .. } => status::UNPROCESSABLE_ENTITY,
        _ => status::NOT_FOUND,
    }
}
