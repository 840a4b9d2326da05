//! Fleet data model.
//!
//! Value types describing clusters, hosts, target repository versions and
//! the per-host version records the checks classify:
//!
//! - [`StackId`] - distribution name and major version
//! - [`RepositoryVersion`] - the version an upgrade targets
//! - [`Cluster`], [`Host`], [`MaintenanceState`] - topology
//! - [`HostVersionRecord`], [`HostVersionState`] - per-host install state

pub mod host;
pub mod host_version;
pub mod repository;
pub mod stack;

pub use host::{Cluster, Host, MaintenanceState};
pub use host_version::{HostVersionRecord, HostVersionState};
pub use repository::{RepositoryType, RepositoryVersion, VersionDefinition};
pub use stack::StackId;
