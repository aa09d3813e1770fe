// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Route paths and field names in docs
#![allow(clippy::must_use_candidate)] // Not all returned values need must_use
#![allow(clippy::return_self_not_must_use)] // Builder pattern returns Self
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::format_push_string)] // String building style
#![allow(clippy::cast_possible_truncation)] // JSON numbers within checked ranges
#![allow(clippy::cast_precision_loss)] // i64 -> f64 only below 2^53
#![allow(clippy::indexing_slicing)] // Loop indices checked against the length

//! trivia-api - the trivia service over HTTP
//!
//! # Overview
//!
//! Wires [`trivia_core`] to a JSON-over-HTTP surface:
//!
//! - [`Request`] and [`Response`] are transport-neutral request/response values
//! - [`Router`] matches `{name}` patterns and applies the CORS and
//!   method-not-allowed rules
//! - [`App`] owns the [`QuestionService`](trivia_core::QuestionService), the
//!   quiz random source and the route table
//! - [`server`] runs an [`App`] behind hyper
//! - [`Config`] resolves settings from TOML, `TRIVIA_*` variables and flags
//!
//! ```text
//! hyper ──► server ──► App::handle ──► Router ──► handler ──► QuestionService
//!                                        │                        │
//!                                   CORS, 404/405            RecordStore
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET    | `/categories` | 200 `categories` |
//! | GET    | `/questions?page=` | 200 `questions`, `total_questions`, `categories`, `current_category` |
//! | POST   | `/questions` | 201 `created`, `questions`, `total_questions` |
//! | DELETE | `/questions/{id}?page=` | 200 `deleted`, `questions`, `total_questions` |
//! | POST   | `/search_questions?page=` | 200 `questions`, `total_questions`, `current_category` |
//! | GET    | `/categories/{id}/questions?page=` | 200 `questions`, `total_questions`, `current_category` |
//! | POST   | `/quizzes` | 200 `question`, `current_category` |
//!
//! Failures are `application/problem+json` with the status chosen by
//! [`status_for`].
//!
//! # In-process use
//!
//! ```
//! use trivia_api::{App, Method, Request};
//! use trivia_core::MemoryStore;
//!
//! let app = App::new(MemoryStore::with_categories(["Science"]));
//! let body = br#"{"question":"H2O?","answer":"Water","category":1,"difficulty":1}"#;
//! let resp = app.handle(Request::new(
//!     Method::Post,
//!     "/questions".into(),
//!     vec![("Content-Type".into(), "application/json".into())],
//!     Some(body.to_vec()),
//! ));
//! assert_eq!(resp.status(), 201);
//! assert_eq!(resp.json_body().unwrap().get("total_questions").int(), Some(1));
//! ```

mod app;
pub mod config;
pub mod constants;
pub mod handlers;
pub mod json;
pub mod log;
mod request;
mod response;
pub mod router;
pub mod server;

pub use app::App;
pub use config::{Config, ConfigError};
pub use request::{DecodeError, Method, Request, url_decode};
pub use response::{Response, status_for};
pub use router::{Handler, Route, Router, match_pattern};

/// HTTP status codes the service answers with.
pub mod status {
    /// 200 OK
    pub const OK: u16 = 200;
    /// 201 Created
    pub const CREATED: u16 = 201;
    /// 204 No Content, the CORS preflight answer
    pub const NO_CONTENT: u16 = 204;
    /// 400 Bad Request
    pub const BAD_REQUEST: u16 = 400;
    /// 404 Not Found
    pub const NOT_FOUND: u16 = 404;
    /// 405 Method Not Allowed
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    /// 413 Payload Too Large
    pub const PAYLOAD_TOO_LARGE: u16 = 413;
    /// 422 Unprocessable Entity, used for store failures
    pub const UNPROCESSABLE_ENTITY: u16 = 422;
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Common imports for embedding the service.
pub mod prelude {
    pub use crate::json::{self, JsonValue, ToJson};
    pub use crate::{App, Config, Method, Request, Response, Router, status};
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
