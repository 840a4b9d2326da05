//! Configuration validation rules.
//!
//! Every problem is collected so users can fix them in one pass.

use crate::config::schema::UpgateConfig;
use crate::error::{Result, UpgateError};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &UpgateConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.settings.max_parallel == 0 {
        errors.push(ValidationError::new(
            "max-parallel",
            "settings.max_parallel must be at least 1",
        ));
    }

    if config.settings.state_file.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "state-file",
            "settings.state_file must not be empty",
        ));
    }

    for (index, id) in config.checks.skip.iter().enumerate() {
        if id.trim().is_empty() {
            errors.push(ValidationError::new(
                "skip-id",
                format!("checks.skip[{}] is empty", index),
            ));
        }
    }

    errors
}

/// Validate a configuration, failing with every message joined.
pub fn validate(config: &UpgateConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(UpgateError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
