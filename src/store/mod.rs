//! Collaborator interfaces consumed by the checks.
//!
//! Checks never own cluster or version data. They read it through two
//! narrow, synchronous traits passed in at construction:
//!
//! - [`TopologyProvider`] - clusters, their hosts and maintenance state
//! - [`VersionStore`] - repository versions and per-host version records
//!
//! [`FleetSnapshot`] implements both over an in-memory, YAML-loadable
//! description of a fleet. The CLI reads one from disk; tests build them
//! in code.
//!
//! "Not found" is always `Ok(None)`. `Err` means the lookup itself failed.

pub mod snapshot;

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Cluster, Host, HostVersionRecord, RepositoryVersion, StackId};

pub use snapshot::{ClusterEntry, FleetSnapshot, HostEntry};

/// Read access to cluster topology.
pub trait TopologyProvider: Send + Sync {
    /// Look up a cluster by name.
    fn cluster(&self, name: &str) -> Result<Option<Cluster>>;

    /// All hosts of a cluster, keyed by host name.
    fn hosts_for_cluster(&self, name: &str) -> Result<HashMap<String, Host>>;
}

/// Read access to repository versions and host version records.
pub trait VersionStore: Send + Sync {
    /// Find the registered repository version for a stack and version string.
    fn find_repository_version(
        &self,
        stack: &StackId,
        version: &str,
    ) -> Result<Option<RepositoryVersion>>;

    /// Find the record of a host's state for a stack and version in a cluster.
    fn find_host_version(
        &self,
        cluster: &str,
        stack: &StackId,
        version: &str,
        host: &str,
    ) -> Result<Option<HostVersionRecord>>;
}
