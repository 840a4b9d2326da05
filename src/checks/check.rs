//! Upgrade check definitions.
//!
//! This module provides the core traits and types for defining checks:
//!
//! - [`UpgradeCheck`] - The trait that all precondition checks implement
//! - [`CheckId`] - Unique identifier for a check
//! - [`CheckKind`] - What a check's failures point at
//! - [`CheckRequest`] - The cluster and target version under evaluation

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::cancel::CancelToken;
use super::result::CheckResult;
use crate::error::{Result, UpgateError};
use crate::model::RepositoryVersion;

/// Unique identifier for a check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub String);

impl CheckId {
    /// Create a new check ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The entity type a check's `failed_on` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckKind {
    /// Failures name hosts.
    Host,
    /// Failures name services.
    Service,
    /// Failures name the cluster.
    Cluster,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Host => write!(f, "host"),
            CheckKind::Service => write!(f, "service"),
            CheckKind::Cluster => write!(f, "cluster"),
        }
    }
}

/// How the upgrade will walk the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeType {
    /// Services are upgraded one component at a time while running.
    #[default]
    Rolling,
    /// The cluster is stopped, upgraded and restarted.
    NonRolling,
    /// Every host is upgraded in turn.
    HostOrdered,
}

impl fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeType::Rolling => write!(f, "rolling"),
            UpgradeType::NonRolling => write!(f, "non-rolling"),
            UpgradeType::HostOrdered => write!(f, "host-ordered"),
        }
    }
}

/// A request to evaluate checks for one cluster and target version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// Cluster name.
    pub cluster: String,
    /// Version the upgrade targets.
    pub target: RepositoryVersion,
    /// How the upgrade will proceed.
    pub upgrade_type: UpgradeType,
}

impl CheckRequest {
    /// Create a rolling-upgrade request.
    pub fn new(cluster: impl Into<String>, target: RepositoryVersion) -> Self {
        Self {
            cluster: cluster.into(),
            target,
            upgrade_type: UpgradeType::default(),
        }
    }

    /// Set the upgrade type.
    pub fn with_upgrade_type(mut self, upgrade_type: UpgradeType) -> Self {
        self.upgrade_type = upgrade_type;
        self
    }

    /// Reject requests that no check can make sense of.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.cluster.trim().is_empty() {
            Some("cluster name is empty")
        } else if self.target.stack.name.trim().is_empty() {
            Some("target stack name is empty")
        } else if self.target.version.trim().is_empty() {
            Some("target version is empty")
        } else {
            None
        };

        match problem {
            Some(message) => Err(UpgateError::MalformedRequest {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A precondition that must hold before an upgrade may start.
///
/// Checks are read-only: they consult the collaborators they were built
/// with and never mutate cluster state, so the runner may execute them
/// concurrently. `perform` is only called after `is_applicable` returned
/// `true` for the same request.
pub trait UpgradeCheck: Send + Sync {
    /// Unique identifier for this check.
    fn id(&self) -> CheckId;

    /// Description of what this check verifies.
    fn description(&self) -> &str;

    /// What the check's failures point at.
    fn kind(&self) -> CheckKind;

    /// Whether the check makes sense for this request.
    ///
    /// Must be side-effect free.
    fn is_applicable(&self, _request: &CheckRequest) -> bool {
        true
    }

    /// Evaluate the check.
    ///
    /// An `Err` means the check could not reach a verdict; the runner
    /// reports it as a failure without affecting sibling checks.
    fn perform(&self, request: &CheckRequest, cancel: &CancelToken) -> Result<CheckResult>;
}
