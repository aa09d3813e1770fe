//! Route table and dispatch.
//!
//! Patterns are literal segments and `{name}` captures:
//!
//! ```text
//! /categories/{id}/questions   matches  /categories/3/questions   (id = "3")
//! /questions/{id}              matches  /questions/12             (id = "12")
//! ```
//!
//! Dispatch order: `OPTIONS` answers 204 for any path, a path no route
//! matches is 404, a path matched only under other methods is 405 with an
//! `Allow` header. Every response gets the CORS headers and one log line.

use std::collections::HashMap;
use std::time::Instant;

use trivia_core::Error;

use crate::request::{Method, Request};
use crate::response::Response;
use crate::status;

/// Handler signature: shared context plus the matched request.
pub type Handler<C> = fn(&C, &Request) -> Result<Response, Error>;

/// One method and pattern bound to a handler.
pub struct Route<C> {
    method: Method,
    pattern: &'static str,
    handler: Handler<C>,
}

impl<C> std::fmt::Debug for Route<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)
    }
}

/// Ordered route table.
///
/// ```
/// use trivia_api::{Method, Request, Response, Router, json};
///
/// let router: Router<()> = Router::new()
///     .route(Method::Get, "/ping/{name}", |_, req| {
///         Ok(Response::ok(json::obj().set("name", json::str(req.param("name").unwrap_or("")))))
///     });
///
/// let resp = router.dispatch(&(), Request::new(Method::Get, "/ping/quiz".into(), vec![], None));
/// assert_eq!(resp.status(), 200);
///
/// let resp = router.dispatch(&(), Request::new(Method::Post, "/ping/quiz".into(), vec![], None));
/// assert_eq!(resp.status(), 405);
/// assert_eq!(resp.header("Allow"), Some("GET, OPTIONS"));
/// ```
pub struct Router<C> {
    routes: Vec<Route<C>>,
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<C> std::fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}

impl<C> Router<C> {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Earlier routes win when several match.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` does not start with `/` or has an empty `{}`
    /// capture.
    #[must_use]
    pub fn route(mut self, method: Method, pattern: &'static str, handler: Handler<C>) -> Self {
        assert!(pattern.starts_with('/'), "route pattern must start with '/': {pattern}");
        assert!(!pattern.contains("{}"), "route capture needs a name: {pattern}");
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        self
    }

    /// Registered routes as `(method, pattern)`.
    pub fn routes(&self) -> impl Iterator<Item = (Method, &'static str)> + '_ {
        self.routes.iter().map(|r| (r.method, r.pattern))
    }

    /// Route `req`, run its handler and log the outcome.
    pub fn dispatch(&self, ctx: &C, req: Request) -> Response {
        let started = Instant::now();
        let method = req.method();
        let path = req.path().to_string();

        let response = self.respond(ctx, req).with_cors();

        crate::log!(
            info,
            "request",
            method: method,
            path: path,
            status: response.status(),
            micros: started.elapsed().as_micros()
        );
        response
    }

    fn respond(&self, ctx: &C, req: Request) -> Response {
        if req.method() == Method::Options {
            return Response::no_content();
        }

        let mut allowed: Vec<Method> = Vec::new();
        for route in &self.routes {
            let Some(params) = match_pattern(route.pattern, req.route_path()) else {
                continue;
            };
            if route.method != req.method() {
                if !allowed.contains(&route.method) {
                    allowed.push(route.method);
                }
                continue;
            }
            let req = req.with_params(params);
            return match (route.handler)(ctx, &req) {
                Ok(response) => response,
                Err(err) => {
                    if matches!(err, Error::Unprocessable { .. }) {
                        crate::log_error!("{} {} failed: {}", route.method, route.pattern, err);
                    }
                    Response::from_error(&err)
                },
            };
        }

        if allowed.is_empty() {
            return Response::problem(status::NOT_FOUND, "no route for this path");
        }
        let allow = allowed
            .iter()
            .copied()
            .map(Method::as_str)
            .chain(std::iter::once("OPTIONS"))
            .collect::<Vec<_>>()
            .join(", ");
        Response::problem(
            status::METHOD_NOT_ALLOWED,
            &format!("{} is not allowed here", req.method()),
        )
        .with_header("Allow", &allow)
    }
}

/// Match `path` against `pattern`, returning the `{name}` captures.
///
/// Captured segments are taken verbatim; an empty segment never matches a
/// capture.
pub fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let mut params = HashMap::new();
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                {
                    if actual.is_empty() {
                        return None;
                    }
                    params.insert(name.to_string(), actual.to_string());
                } else if expected != actual {
                    return None;
                }
            },
            _ => return None,
        }
    }
}
