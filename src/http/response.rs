//! Response for blocked requests.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Body sent in place of a blocked request.
pub const BLOCKED_BODY: &str = "Blocked by proxy!";

/// `403 Forbidden` with a plain-text explanation.
pub fn blocked_response() -> Response {
    (
        StatusCode::FORBIDDEN,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        BLOCKED_BODY,
    )
        .into_response()
}
