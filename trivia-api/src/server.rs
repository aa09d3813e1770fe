//! hyper 0.14 front end.
//!
//! Converts hyper requests into [`Request`], runs [`App::handle`] on the
//! blocking pool (the record store is synchronous) and converts the
//! [`Response`] back. Bodies larger than the configured limit are refused
//! with 413 before any handler runs.

use std::convert::Infallible;
use std::future::Future;
use std::net::TcpListener;
use std::sync::Arc;

use hyper::body::HttpBody;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Server};
use trivia_core::RecordStore;

use crate::app::App;
use crate::request::{Method, Request};
use crate::response::Response;
use crate::status;

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<S, F>(
    app: Arc<App<S>>,
    listener: TcpListener,
    max_body_size: usize,
    shutdown: F,
) -> Result<(), hyper::Error>
where
    S: RecordStore + 'static,
    F: Future<Output = ()>,
{
    let make_svc = make_service_fn(move |_conn| {
        let app = Arc::clone(&app);
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                handle(Arc::clone(&app), max_body_size, req)
            }))
        }
    });

    let server = Server::from_tcp(listener)?.serve(make_svc);
    crate::log!(info, "listening", addr: server.local_addr(), max_body_size: max_body_size);
    server.with_graceful_shutdown(shutdown).await
}

async fn handle<S: RecordStore + 'static>(
    app: Arc<App<S>>,
    max_body_size: usize,
    req: hyper::Request<Body>,
) -> Result<hyper::Response<Body>, Infallible> {
    let response = match into_request(req, max_body_size).await {
        Ok(req) => match tokio::task::spawn_blocking(move || app.handle(req)).await {
            Ok(response) => response,
            Err(err) => {
                crate::log_error!("handler task failed: {}", err);
                Response::problem(status::INTERNAL_SERVER_ERROR, "request handler failed")
                    .with_cors()
            },
        },
        Err(rejected) => rejected.with_cors(),
    };
    Ok(into_hyper(response))
}

/// Read a hyper request into a [`Request`], or the response that refuses it.
async fn into_request(req: hyper::Request<Body>, max_body_size: usize) -> Result<Request, Response> {
    let (parts, mut body) = req.into_parts();
    let path = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());

    let Some(method) = Method::parse(parts.method.as_str()) else {
        return Err(reject(status::METHOD_NOT_ALLOWED, parts.method.as_str(), &path));
    };

    let declared = parts
        .headers
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > max_body_size) {
        return Err(reject(status::PAYLOAD_TOO_LARGE, method.as_str(), &path));
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|e| {
            crate::log_warn!("failed to read request body: {}", e);
            Response::problem(status::BAD_REQUEST, "could not read request body")
        })?;
        if bytes.len() + chunk.len() > max_body_size {
            return Err(reject(status::PAYLOAD_TOO_LARGE, method.as_str(), &path));
        }
        bytes.extend_from_slice(&chunk);
    }

    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    Ok(Request::new(method, path, headers, Some(bytes)))
}

fn reject(status: u16, method: &str, path: &str) -> Response {
    crate::log!(warn, "request rejected", method: method, path: path, status: status);
    let detail = match status {
        status::PAYLOAD_TOO_LARGE => "request body exceeds the configured limit",
        _ => "unsupported method",
    };
    Response::problem(status, detail)
}

fn into_hyper(response: Response) -> hyper::Response<Body> {
    let (status, headers, body) = response.into_parts();
    let mut builder = hyper::Response::builder().status(status);
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Body::from(body)).unwrap_or_else(|e| {
        crate::log_error!("response build failed: {}", e);
        let mut fallback = hyper::Response::new(Body::empty());
        *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}
