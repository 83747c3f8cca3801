//! Filter outcomes.

use std::fmt;

use serde::Serialize;

/// Why a request was blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    /// `Sec-Fetch-Dest` named a blocked destination.
    FetchDestination { destination: String },
    /// Host contained a denylist pattern.
    Denylisted { index: usize, pattern: String },
}

impl BlockReason {
    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            BlockReason::FetchDestination { .. } => "fetch_dest",
            BlockReason::Denylisted { .. } => "denylist",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::FetchDestination { destination } => {
                write!(f, "fetch destination '{}'", destination)
            }
            BlockReason::Denylisted { index, pattern } => {
                write!(f, "denylist pattern #{} '{}'", index, pattern)
            }
        }
    }
}

/// Result of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Block(BlockReason),
}

impl Decision {
    /// `true` forwards the request, `false` drops it.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<&BlockReason> {
        match self {
            Decision::Allow => None,
            Decision::Block(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::Block(reason) => write!(f, "block ({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Decision::Allow.to_string(), "allow");
        let decision = Decision::Block(BlockReason::Denylisted {
            index: 3,
            pattern: "doubleclick".into(),
        });
        assert_eq!(decision.to_string(), "block (denylist pattern #3 'doubleclick')");
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason().map(BlockReason::label), Some("denylist"));
    }
}
