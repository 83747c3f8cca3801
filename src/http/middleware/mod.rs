//! Axum middleware.

pub mod request_filter;
pub mod response_body;

pub use request_filter::request_filter_middleware;
pub use response_body::{response_body_middleware, BodyRewrite, IdentityRewrite};
