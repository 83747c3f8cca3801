//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! filter + config subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (decision and reload counters)
//!
//! Consumers:
//!     → stderr (pretty, compact or JSON)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are cheap (atomic increments) and no-ops without a recorder
//! - Neither sink can fail a filter decision

pub mod logging;
pub mod metrics;
