//! Upgrade precondition checks.
//!
//! This module contains the check engine:
//!
//! - [`UpgradeCheck`] - the trait every precondition implements
//! - [`CheckRegistry`] - ordered set of checks for a run
//! - [`CheckRunner`] - executes a registry against a [`CheckRequest`]
//! - [`HostVersionEvaluator`] - shared host-by-host version classification
//! - [`rules`] - the built-in checks
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use upgate::checks::{CancelToken, CheckRegistry, CheckRequest, CheckRunner, Verdict};
//! use upgate::model::{HostVersionState, MaintenanceState, RepositoryVersion, StackId};
//! use upgate::store::FleetSnapshot;
//!
//! let target = RepositoryVersion::new(StackId::new("HDP", "2.6"), "2.6.4.0-91");
//! let fleet = Arc::new(
//!     FleetSnapshot::new()
//!         .with_host("c1", "h1", MaintenanceState::Off)
//!         .with_repository_version(target.clone())
//!         .with_host_version("c1", "h1", &target, HostVersionState::Installed),
//! );
//!
//! let registry = CheckRegistry::with_builtins(fleet.clone(), fleet.clone());
//! let report = CheckRunner::new(fleet)
//!     .run(&registry, &CheckRequest::new("c1", target), &CancelToken::new())
//!     .unwrap();
//! assert_eq!(report.verdict(), Verdict::Pass);
//! ```

pub mod cancel;
pub mod check;
pub mod evaluator;
pub mod registry;
pub mod result;
pub mod rules;
pub mod runner;

pub use cancel::CancelToken;
pub use check::{CheckId, CheckKind, CheckRequest, UpgradeCheck, UpgradeType};
pub use evaluator::{
    classify_host, ClusterEvaluation, Evaluation, HostClassification, HostVersionEvaluator,
    UnsatisfiedReason,
};
pub use registry::CheckRegistry;
pub use result::{CheckReport, CheckResult, CheckStatus, ReportSummary, Verdict};
pub use runner::{CheckRunner, DEFAULT_MAX_PARALLEL};
