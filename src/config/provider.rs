//! Policy sources consulted at initialization.

use std::path::{Path, PathBuf};

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::PolicyConfig;

/// Supplies the filtering policy once, when the filter is built.
pub trait PolicyProvider: Send + Sync {
    fn load(&self) -> Result<PolicyConfig, ConfigError>;

    /// Human-readable source name for logs.
    fn describe(&self) -> String;
}

/// The policy compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPolicy;

impl PolicyProvider for BuiltinPolicy {
    fn load(&self) -> Result<PolicyConfig, ConfigError> {
        Ok(PolicyConfig::default())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// A policy that has already been loaded, labelled with where it came from.
#[derive(Debug, Clone)]
pub struct StaticPolicy {
    policy: PolicyConfig,
    source: String,
}

impl StaticPolicy {
    pub fn new(policy: PolicyConfig, source: impl Into<String>) -> Self {
        Self {
            policy,
            source: source.into(),
        }
    }
}

impl PolicyProvider for StaticPolicy {
    fn load(&self) -> Result<PolicyConfig, ConfigError> {
        Ok(self.policy.clone())
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}

/// The `[policy]` section of a TOML file.
#[derive(Debug, Clone)]
pub struct FilePolicy {
    path: PathBuf,
}

impl FilePolicy {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PolicyProvider for FilePolicy {
    fn load(&self) -> Result<PolicyConfig, ConfigError> {
        Ok(load_config(&self.path)?.policy)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Policy, RequestDescriptor, RequestFilter};
    use std::io::Write;

    #[test]
    fn test_builtin() {
        let filter = RequestFilter::from_provider(&BuiltinPolicy).unwrap();
        assert_eq!(filter, RequestFilter::default());
    }

    #[test]
    fn test_file_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[policy]\ndenylist = [\"example\"]\nblocked_destinations = []\n\n[policy.info]\nversion = \"7\""
        )
        .unwrap();

        let provider = FilePolicy::new(file.path());
        let filter = RequestFilter::from_provider(&provider).unwrap();
        assert!(!filter.decide(&RequestDescriptor::new("www.example.org")));
        assert!(filter.decide(&RequestDescriptor::new("ads.doubleclick.net")));
        assert!(filter.blocked_destinations().is_empty());
    }

    #[test]
    fn test_static_policy() {
        let policy = PolicyConfig {
            denylist: vec!["beacon".into()],
            ..PolicyConfig::default()
        };
        let provider = StaticPolicy::new(policy.clone(), "inline");
        assert_eq!(provider.describe(), "inline");

        let filter = RequestFilter::from_provider(&provider).unwrap();
        assert_eq!(filter, RequestFilter::from_config(&policy));
        assert!(!filter.decide(&RequestDescriptor::new("beacon.example")));
    }

    #[test]
    fn test_file_policy_error_propagates() {
        let provider = FilePolicy::new("/nonexistent/policy.toml");
        assert!(matches!(
            RequestFilter::from_provider(&provider),
            Err(ConfigError::Io(_))
        ));
    }
}
