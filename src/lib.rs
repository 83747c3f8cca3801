//! Host denylist and fetch-destination request filter.
//!
//! A proxy host builds a [`RequestDescriptor`] per intercepted request and
//! asks a [`Policy`] whether to forward it:
//!
//! ```
//! use request_filter::{Policy, RequestDescriptor, RequestFilter};
//!
//! let filter = RequestFilter::default();
//! assert!(!filter.decide(&RequestDescriptor::new("ads.doubleclick.net")));
//! assert!(filter.decide(&RequestDescriptor::new("example.com").with_header("Sec-Fetch-Dest", "image")));
//! ```

pub mod config;
pub mod filter;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::FilterConfig;
pub use filter::{
    BlockReason, Decision, Denylist, FilterHandle, Policy, RequestDescriptor, RequestFilter,
    SEC_FETCH_DEST,
};
pub use lifecycle::Shutdown;
