//! The request filter.
//!
//! # Responsibilities
//! - Block requests whose fetch destination is on the blocked list
//! - Block requests whose host contains a denylist pattern
//! - Allow everything else, including malformed or empty hosts
//!
//! # Design Decisions
//! - Fetch-destination check runs first and short-circuits the scan
//! - First denylist match wins; order only affects the reported pattern
//! - Immutable after construction, so one instance serves every thread
//! - Diagnostics are best-effort and never change the outcome

use crate::config::provider::PolicyProvider;
use crate::config::schema::PolicyConfig;
use crate::config::loader::ConfigError;
use crate::filter::decision::{BlockReason, Decision};
use crate::filter::denylist::Denylist;
use crate::filter::descriptor::RequestDescriptor;
use crate::filter::policy::Policy;
use crate::observability::metrics;

/// Fetch destination blocked by default.
pub const DEFAULT_BLOCKED_DESTINATION: &str = "video";

/// Denylist plus fetch-destination rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFilter {
    denylist: Denylist,
    blocked_destinations: Vec<String>,
}

impl RequestFilter {
    pub fn new(denylist: Denylist, blocked_destinations: Vec<String>) -> Self {
        Self {
            denylist,
            blocked_destinations,
        }
    }

    /// Build a filter from a validated policy section.
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(
            Denylist::new(config.denylist.iter().cloned()),
            config.blocked_destinations.clone(),
        )
    }

    /// Load the policy once from `provider` and build a filter from it.
    pub fn from_provider(provider: &dyn PolicyProvider) -> Result<Self, ConfigError> {
        let config = provider.load()?;

        match &config.info {
            Some(info) => tracing::info!(
                source = %provider.describe(),
                version = info.version.as_deref().unwrap_or("unversioned"),
                description = info.description.as_deref().unwrap_or(""),
                patterns = config.denylist.len(),
                "Policy loaded"
            ),
            None => tracing::info!(
                source = %provider.describe(),
                patterns = config.denylist.len(),
                "Policy loaded"
            ),
        }

        Ok(Self::from_config(&config))
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    pub fn blocked_destinations(&self) -> &[String] {
        &self.blocked_destinations
    }

    fn check(&self, request: &RequestDescriptor) -> Decision {
        if let Some(dest) = request.fetch_dest() {
            if self.blocked_destinations.iter().any(|blocked| blocked == dest) {
                return Decision::Block(BlockReason::FetchDestination {
                    destination: dest.to_string(),
                });
            }
        }

        match self.denylist.first_match(&request.host) {
            Some((index, pattern)) => Decision::Block(BlockReason::Denylisted {
                index,
                pattern: pattern.to_string(),
            }),
            None => Decision::Allow,
        }
    }
}

impl Default for RequestFilter {
    fn default() -> Self {
        Self::new(
            Denylist::default(),
            vec![DEFAULT_BLOCKED_DESTINATION.to_string()],
        )
    }
}

impl Policy for RequestFilter {
    fn evaluate(&self, request: &RequestDescriptor) -> Decision {
        trace_incoming(request);

        let decision = self.check(request);

        match decision.reason() {
            Some(reason) => {
                tracing::info!(host = %request.host, reason = %reason, "Request blocked");
                metrics::record_decision("block", reason.label());
            }
            None => metrics::record_decision("allow", "none"),
        }

        decision
    }
}

fn trace_incoming(request: &RequestDescriptor) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    match serde_json::to_string(request) {
        Ok(json) => tracing::debug!(request = %json, "Evaluating request"),
        Err(e) => tracing::debug!(host = %request.host, error = %e, "Evaluating request (descriptor not renderable)"),
    }
}
