//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! policy file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FilterConfig (validated, immutable)
//!     → provider.rs hands the policy section to the filter at startup
//!
//! On file change (reload enabled):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → FilterHandle swaps in a new snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A rejected reload keeps the previous policy

pub mod loader;
pub mod provider;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use provider::{BuiltinPolicy, FilePolicy, PolicyProvider, StaticPolicy};
pub use schema::{FilterConfig, LogFormat, ObservabilityConfig, PolicyConfig, PolicyInfo, ReloadConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::PolicyWatcher;
