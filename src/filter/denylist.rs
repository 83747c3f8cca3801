//! Hostname substring denylist.

use std::sync::Arc;

/// Patterns shipped with the crate, in scan order.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "adservice",
    "googlesyndication",
    "facbook",
    "doubleclick",
    "analytics",
    "gemius",
    "rubiconproject",
];

/// Immutable, ordered list of hostname substrings.
///
/// Cloning is cheap; all clones share the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    patterns: Arc<[String]>,
}

impl Denylist {
    /// Build a denylist from patterns, keeping their order.
    ///
    /// Patterns are taken as-is and matched case-sensitively; the lowercase
    /// rule is enforced by config validation, not here. Empty patterns are
    /// dropped since they would match every host.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            patterns: patterns.into(),
        }
    }

    /// First pattern contained in `host`, with its position in the list.
    pub fn first_match(&self, host: &str) -> Option<(usize, &str)> {
        self.patterns
            .iter()
            .enumerate()
            .find(|(_, pattern)| host.contains(pattern.as_str()))
            .map(|(index, pattern)| (index, pattern.as_str()))
    }

    pub fn contains_match(&self, host: &str) -> bool {
        self.first_match(host).is_some()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.iter().copied())
    }
}
