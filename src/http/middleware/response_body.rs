//! HTML response rewriting middleware.
//! Hands non-empty `text/html` bodies to a [`BodyRewrite`] before they reach
//! the client.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Largest body buffered for rewriting.
pub const MAX_REWRITE_BODY: usize = 16 * 1024 * 1024;

/// Rewrites HTML page content on its way back to the client.
pub trait BodyRewrite: Send + Sync {
    fn rewrite(&self, body: String) -> String;
}

/// Leaves every body untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRewrite;

impl BodyRewrite for IdentityRewrite {
    fn rewrite(&self, body: String) -> String {
        body
    }
}

impl<F> BodyRewrite for F
where
    F: Fn(String) -> String + Send + Sync,
{
    fn rewrite(&self, body: String) -> String {
        self(body)
    }
}

pub async fn response_body_middleware(
    State(rewrite): State<Arc<dyn BodyRewrite>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if !is_html(response.headers()) || declares_empty(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_REWRITE_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to buffer HTML response");
            return (StatusCode::BAD_GATEWAY, "Upstream response unreadable").into_response();
        }
    };

    if bytes.is_empty() {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let body = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => Body::from(rewrite.rewrite(text)),
        Err(_) => {
            tracing::debug!("HTML response is not UTF-8, passing through");
            Body::from(bytes)
        }
    };

    // Length is recomputed from the new body.
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, body)
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false)
}

fn declares_empty(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_html_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_html(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        assert!(is_html(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_html(&headers));
    }

    #[test]
    fn test_declared_empty() {
        let mut headers = HeaderMap::new();
        assert!(!declares_empty(&headers));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        assert!(declares_empty(&headers));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        assert!(!declares_empty(&headers));
    }

    #[test]
    fn test_identity_and_closure() {
        assert_eq!(IdentityRewrite.rewrite("<p>x</p>".into()), "<p>x</p>");
        let upper = |body: String| body.to_uppercase();
        assert_eq!(upper.rewrite("<p>x</p>".into()), "<P>X</P>");
    }
}
