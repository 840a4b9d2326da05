//! Upgate - Cluster upgrade precondition checks.
//!
//! Upgate decides whether a cluster is ready for a rolling or non-rolling
//! upgrade to a target repository version. A registry of pluggable checks
//! inspects read-only fleet data and each produces a structured result;
//! the runner aggregates them into a report with a single verdict.
//!
//! # Modules
//!
//! - [`checks`] - Check trait, registry, runner, evaluator, built-in checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`model`] - Stacks, repository versions, hosts, version records
//! - [`output`] - Human and JSON report formatters
//! - [`store`] - Topology and version store traits, fleet snapshots
//! - [`ui`] - Terminal output abstraction
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use upgate::checks::{CancelToken, CheckRegistry, CheckRequest, CheckRunner, CheckStatus};
//! use upgate::model::{MaintenanceState, RepositoryVersion, StackId};
//! use upgate::store::FleetSnapshot;
//!
//! let fleet = Arc::new(FleetSnapshot::new().with_host("c1", "h1", MaintenanceState::Off));
//! let target = RepositoryVersion::new(StackId::new("HDP", "2.6"), "2.6.4.0-91");
//!
//! let registry = CheckRegistry::with_builtins(fleet.clone(), fleet.clone());
//! let report = CheckRunner::new(fleet)
//!     .run(&registry, &CheckRequest::new("c1", target), &CancelToken::new())
//!     .unwrap();
//!
//! // The target was never registered, so the host check fails.
//! let result = report.result("hosts-repository-version").unwrap();
//! assert_eq!(result.status, CheckStatus::Fail);
//! assert!(result.failed_on.contains("h1"));
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod store;
pub mod ui;

pub use error::{Result, UpgateError};
