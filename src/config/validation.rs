//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Keep the denylist lowercase and free of match-everything patterns
//! - Validate value ranges (poll interval > 0, parseable log directive)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FilterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::FilterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("policy.denylist[{index}] is empty")]
    EmptyPattern { index: usize },

    #[error("policy.denylist[{index}] '{pattern}' is not lowercase")]
    NotLowercase { index: usize, pattern: String },

    #[error("policy.blocked_destinations[{index}] is empty")]
    EmptyDestination { index: usize },

    #[error("observability.log_level '{directive}' is not a valid filter directive")]
    InvalidLogLevel { directive: String },

    #[error("reload.poll_interval_secs must be greater than zero")]
    ZeroPollInterval,
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &FilterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, pattern) in config.policy.denylist.iter().enumerate() {
        if pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
        } else if pattern.chars().any(char::is_uppercase) {
            errors.push(ValidationError::NotLowercase {
                index,
                pattern: pattern.clone(),
            });
        }
    }

    for (index, dest) in config.policy.blocked_destinations.iter().enumerate() {
        if dest.is_empty() {
            errors.push(ValidationError::EmptyDestination { index });
        }
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel {
            directive: config.observability.log_level.clone(),
        });
    }

    if config.reload.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&FilterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FilterConfig::default();
        config.policy.denylist = vec!["ok".into(), "".into(), "DoubleClick".into()];
        config.policy.blocked_destinations = vec!["".into()];
        config.observability.log_level = "request_filter=loud".into();
        config.reload.poll_interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyPattern { index: 1 },
                ValidationError::NotLowercase {
                    index: 2,
                    pattern: "DoubleClick".into()
                },
                ValidationError::EmptyDestination { index: 0 },
                ValidationError::InvalidLogLevel {
                    directive: "request_filter=loud".into()
                },
                ValidationError::ZeroPollInterval,
            ]
        );
    }

    #[test]
    fn test_digits_and_punctuation_are_lowercase_enough() {
        let mut config = FilterConfig::default();
        config.policy.denylist = vec!["ads-1.example".into(), "tracker:8080".into()];
        assert!(validate_config(&config).is_ok());
    }
}
