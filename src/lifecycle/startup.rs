//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging, then build the filter from the policy provider
//! - Start the policy watcher when reload is enabled
//!
//! # Design Decisions
//! - Fail fast: a bad policy file at startup is an error, not a fallback
//! - Without a config file the built-in policy is used

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use crate::config::loader::{load_config, ConfigError};
use crate::config::provider::{BuiltinPolicy, PolicyProvider, StaticPolicy};
use crate::config::schema::FilterConfig;
use crate::config::watcher::PolicyWatcher;
use crate::filter::engine::RequestFilter;
use crate::filter::handle::FilterHandle;

/// Everything a host needs after startup.
pub struct Runtime {
    pub config: FilterConfig,
    pub filter: FilterHandle,
    config_path: Option<PathBuf>,
}

impl Runtime {
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Start watching the config file, if there is one.
    ///
    /// Updates arrive on the returned receiver; feed them to
    /// [`FilterHandle::follow`]. The watcher stops when dropped.
    pub fn watch(
        &self,
    ) -> Result<Option<(RecommendedWatcher, mpsc::UnboundedReceiver<FilterConfig>)>, notify::Error> {
        let Some(path) = self.config_path() else {
            tracing::warn!("Reload requested without a config file; nothing to watch");
            return Ok(None);
        };
        let interval = Duration::from_secs(self.config.reload.poll_interval_secs);
        let (watcher, updates) = PolicyWatcher::new(path, interval);
        Ok(Some((watcher.run()?, updates)))
    }
}

/// Load configuration and build the filter.
///
/// `init_logs` runs after the config is read and before the policy is built,
/// so the policy load is already logged with the configured settings.
pub fn bootstrap<F>(config_path: Option<&Path>, init_logs: F) -> Result<Runtime, ConfigError>
where
    F: FnOnce(&FilterConfig),
{
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => FilterConfig::default(),
    };

    init_logs(&config);

    // The policy comes from the config read above, so the installed filter
    // and `Runtime::config` never disagree.
    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| BuiltinPolicy.describe());
    let filter = RequestFilter::from_provider(&StaticPolicy::new(config.policy.clone(), source))?;

    Ok(Runtime {
        config,
        filter: FilterHandle::new(filter),
        config_path: config_path.map(Path::to_path_buf),
    })
}
