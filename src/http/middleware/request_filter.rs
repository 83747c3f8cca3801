//! Request filter middleware.
//! Drops requests the active policy blocks.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::filter::{FilterHandle, Policy, RequestDescriptor};
use crate::http::response::blocked_response;

pub async fn request_filter_middleware(
    State(filter): State<FilterHandle>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let descriptor = RequestDescriptor::from(&req);

    if filter.decide(&descriptor) {
        next.run(req).await
    } else {
        blocked_response()
    }
}
