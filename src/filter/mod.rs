//! Request filtering subsystem.
//!
//! # Data Flow
//! ```text
//! Proxy host intercepts request
//!     → descriptor.rs (host + headers, borrowed for one call)
//!     → engine.rs (fetch-destination rule, then denylist scan)
//!     → decision.rs (Allow | Block(reason))
//!     → host forwards or drops
//!
//! On policy reload:
//!     config watcher → handle.rs (atomic snapshot swap)
//! ```
//!
//! # Design Decisions
//! - Stateless and re-entrant; no locks on the hot path
//! - Fail open: malformed input never blocks and never errors
//! - Substring matching, case-sensitive, no normalization

pub mod decision;
pub mod denylist;
pub mod descriptor;
pub mod engine;
pub mod handle;
pub mod policy;

pub use decision::{BlockReason, Decision};
pub use denylist::Denylist;
pub use descriptor::{RequestDescriptor, SEC_FETCH_DEST};
pub use engine::RequestFilter;
pub use handle::FilterHandle;
pub use policy::Policy;
