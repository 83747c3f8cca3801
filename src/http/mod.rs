//! HTTP host adapter.
//!
//! # Data Flow
//! ```text
//! Intercepted http::Request (from the host's proxy engine)
//!     → request.rs (descriptor: host + canonical header names)
//!     → middleware (filter decision)
//!     → allowed: next service, untouched
//!     → blocked: response.rs (403 "Blocked by proxy!")
//!
//! Upstream response
//!     → middleware (non-empty text/html bodies through a BodyRewrite)
//!     → client
//! ```

pub mod middleware;
pub mod request;
pub mod response;

pub use middleware::{request_filter_middleware, response_body_middleware, BodyRewrite, IdentityRewrite};
pub use request::canonical_header_name;
pub use response::{blocked_response, BLOCKED_BODY};
