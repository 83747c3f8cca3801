//! Shared utilities for integration tests.

use std::io::Write;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    middleware,
    routing::any,
    Router,
};
use request_filter::http::{request_filter_middleware, response_body_middleware, BodyRewrite};
use request_filter::{FilterHandle, RequestDescriptor, SEC_FETCH_DEST};
use tempfile::NamedTempFile;

/// Descriptor with an optional fetch destination.
#[allow(dead_code)]
pub fn request(host: &str, dest: Option<&str>) -> RequestDescriptor {
    let desc = RequestDescriptor::new(host);
    match dest {
        Some(dest) => desc.with_header(SEC_FETCH_DEST, dest),
        None => desc,
    }
}

/// Write `content` to a fresh policy file.
#[allow(dead_code)]
pub fn policy_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A stand-in upstream behind the filter middleware; answers "forwarded".
#[allow(dead_code)]
pub fn filtered_app(filter: FilterHandle) -> Router {
    Router::new()
        .route("/", any(|| async { "forwarded" }))
        .route("/{*path}", any(|| async { "forwarded" }))
        .layer(middleware::from_fn_with_state(filter, request_filter_middleware))
}

/// Proxy-style absolute-form request.
#[allow(dead_code)]
pub fn proxy_request(url: &str, dest: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(url);
    if let Some(dest) = dest {
        builder = builder.header("sec-fetch-dest", dest);
    }
    builder.body(Body::empty()).unwrap()
}

/// Upstream answering with a fixed content type and body, behind the
/// response rewriting middleware.
#[allow(dead_code)]
pub fn rewriting_app(
    rewrite: Arc<dyn BodyRewrite>,
    content_type: &'static str,
    body: &'static str,
) -> Router {
    Router::new()
        .route(
            "/",
            any(move || async move { ([(header::CONTENT_TYPE, content_type)], body) }),
        )
        .layer(middleware::from_fn_with_state(rewrite, response_body_middleware))
}
