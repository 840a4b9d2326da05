//! Error types for upgate operations.
//!
//! This module defines [`UpgateError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Structural errors (unknown cluster, malformed request) abort a check run
//!   before any check executes and surface as `Err` from the runner
//! - Everything that happens inside a check is folded into a
//!   [`CheckResult`](crate::checks::CheckResult) and never crosses the runner
//! - Use `anyhow::Error` (via `UpgateError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for upgate operations.
#[derive(Debug, Error)]
pub enum UpgateError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Configuration is well-formed YAML but semantically invalid.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Fleet state file not found.
    #[error("Fleet state not found: {path}")]
    StateNotFound { path: PathBuf },

    /// Failed to parse the fleet state file.
    #[error("Failed to parse fleet state at {path}: {message}")]
    StateParseError { path: PathBuf, message: String },

    /// The requested cluster does not exist.
    #[error("Cluster not found: {cluster}")]
    ClusterNotFound { cluster: String },

    /// The check request is missing required fields.
    #[error("Malformed check request: {message}")]
    MalformedRequest { message: String },

    /// A stack identifier could not be parsed.
    #[error("Invalid stack id '{value}', expected NAME-VERSION (e.g. HDP-2.6)")]
    InvalidStackId { value: String },

    /// A topology or version store lookup failed.
    #[error("Store lookup failed: {message}")]
    StoreUnavailable { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UpgateError {
    /// Whether this error prevents any check from running.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            UpgateError::ClusterNotFound { .. } | UpgateError::MalformedRequest { .. }
        )
    }
}

/// Result type alias for upgate operations.
pub type Result<T> = std::result::Result<T, UpgateError>;
