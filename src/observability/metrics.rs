//! Metrics collection.
//!
//! # Metrics
//! - `request_filter_decisions_total` (counter): decisions by outcome, reason
//! - `request_filter_reloads_total` (counter): policy reloads by result
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; exporting is the host's job
//! - Without an installed recorder every call is a no-op

use metrics::counter;

/// Record one filter decision.
pub fn record_decision(outcome: &'static str, reason: &'static str) {
    counter!("request_filter_decisions_total", "outcome" => outcome, "reason" => reason).increment(1);
}

/// Record a policy reload attempt.
pub fn record_reload(result: &'static str) {
    counter!("request_filter_reloads_total", "result" => result).increment(1);
}
